//! The three internal failure kinds collapse to one public verdict at the
//! `verify` entry point (`bool`); `DilithiumError` stays available to
//! internal code and to tests that need to assert which check fired.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DilithiumError {
    /// A public key, secret key, or signature whose byte length does not
    /// match the active level's declared size.
    #[error("invalid input length")]
    InvalidInputLength,
    /// Hint-vector indices out of order, exceeding omega, non-zero padding,
    /// or a decreasing cumulative count.
    #[error("invalid signature encoding")]
    InvalidSignatureEncoding,
    /// All structural checks passed but the recomputed challenge seed did
    /// not match the one carried in the signature.
    #[error("signature verification failed")]
    VerificationFailed,
    /// The rejection-sampling loop in `sign` exceeded its defensive
    /// iteration cap; only reachable with a broken entropy source.
    #[error("sampler exhausted its iteration budget")]
    SamplerExhausted,
}
