//! Pure-Rust implementation of the CRYSTALS-Dilithium (ML-DSA) post-quantum
//! digital signature scheme, covering NIST security levels 2, 3, and 5.
//!
//! The active parameter set is never global state: every entry point takes
//! a [`Level`] explicitly, so a single process can serve all three levels
//! concurrently. `keygen`'s deterministic seed path and `sign`'s
//! deterministic masking seed are the only modes exercised bit-for-bit
//! against the reference's test vectors; `sign_nondeterministic` is an
//! optional variant sharing the same core.

mod error;
mod keys;
mod ntt;
mod packing;
mod params;
mod poly;
mod polyvec;
mod protocol;
mod reduce;
mod rng;
mod rounding;
mod sponge;

pub use error::DilithiumError;
pub use keys::{PublicKey, SecretKey, Signature};
pub use params::{Level, Params};
pub use protocol::{keygen, keygen_with_rng, sign, sign_nondeterministic, verify};
pub use rng::SeedSource;
