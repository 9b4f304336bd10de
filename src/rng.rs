//! The crate's single seam for non-determinism.
//!
//! `keygen` needs 32 bytes of fresh entropy when the caller does not supply
//! a seed; a non-deterministic `sign` needs 64. Both go through
//! [`SeedSource`] instead of reaching for `rand::thread_rng()` directly, so
//! the rest of the core stays pure and so a KAT harness can substitute a
//! fixed byte source without touching any signing/verification code.

use rand::rngs::OsRng;
use rand::RngCore;

/// Abstracts "give me `out.len()` random bytes".
///
/// The only implementation shipped here wraps the operating system's CSPRNG;
/// deterministic callers (tests, KAT replay) bypass this entirely by passing
/// an explicit seed to `keygen`/`sign` instead of implementing the trait.
pub trait SeedSource {
    fn fill(&mut self, out: &mut [u8]);
}

impl SeedSource for OsRng {
    fn fill(&mut self, out: &mut [u8]) {
        self.fill_bytes(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_rng_fills_the_whole_buffer() {
        let mut out = [0u8; 32];
        OsRng.fill(&mut out);
        assert!(out.iter().any(|&b| b != 0));
    }
}
