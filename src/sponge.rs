//! SHAKE128/SHAKE256 sponge wrappers used as the PRG/XOF throughout Dilithium.
//!
//! Backed by the `sha3` crate's Keccak implementation rather than a
//! hand-rolled Keccak-f[1600] permutation, matching how SHAKE/XOF hashing is
//! reached for elsewhere in this codebase's lineage. The two wrapper types
//! below (one per rate) expose the absorb/finalize/squeeze/squeeze_blocks
//! contract Dilithium's samplers are written against.

use sha3::digest::{ExtendableOutput, ExtendableOutputReset, Update, XofReader};
use sha3::{Shake128, Shake256};

pub const SHAKE128_RATE: usize = 168;
pub const SHAKE256_RATE: usize = 136;

enum Shake128Inner {
    Absorbing(Shake128),
    Squeezing(<Shake128 as ExtendableOutput>::Reader),
}

/// Incremental SHAKE128 sponge state.
pub struct Shake128State {
    inner: Shake128Inner,
}

impl Default for Shake128State {
    fn default() -> Self {
        Shake128State {
            inner: Shake128Inner::Absorbing(Shake128::default()),
        }
    }
}

impl Shake128State {
    pub fn absorb(&mut self, bytes: &[u8]) {
        match &mut self.inner {
            Shake128Inner::Absorbing(h) => Update::update(h, bytes),
            Shake128Inner::Squeezing(_) => panic!("absorb after finalize"),
        }
    }

    pub fn finalize(&mut self) {
        if let Shake128Inner::Absorbing(h) = &mut self.inner {
            let reader = h.clone().finalize_xof_reset();
            self.inner = Shake128Inner::Squeezing(reader);
        }
    }

    pub fn squeeze(&mut self, out: &mut [u8]) {
        match &mut self.inner {
            Shake128Inner::Absorbing(_) => {
                self.finalize();
                self.squeeze(out)
            }
            Shake128Inner::Squeezing(r) => r.read(out),
        }
    }

    pub fn squeeze_blocks(&mut self, nblocks: usize, out: &mut [u8]) {
        self.squeeze(&mut out[..nblocks * SHAKE128_RATE]);
    }
}

enum Shake256Inner {
    Absorbing(Shake256),
    Squeezing(<Shake256 as ExtendableOutput>::Reader),
}

/// Incremental SHAKE256 sponge state.
pub struct Shake256State {
    inner: Shake256Inner,
}

impl Default for Shake256State {
    fn default() -> Self {
        Shake256State {
            inner: Shake256Inner::Absorbing(Shake256::default()),
        }
    }
}

impl Shake256State {
    pub fn absorb(&mut self, bytes: &[u8]) {
        match &mut self.inner {
            Shake256Inner::Absorbing(h) => Update::update(h, bytes),
            Shake256Inner::Squeezing(_) => panic!("absorb after finalize"),
        }
    }

    pub fn finalize(&mut self) {
        if let Shake256Inner::Absorbing(h) = &mut self.inner {
            let reader = h.clone().finalize_xof_reset();
            self.inner = Shake256Inner::Squeezing(reader);
        }
    }

    pub fn squeeze(&mut self, out: &mut [u8]) {
        match &mut self.inner {
            Shake256Inner::Absorbing(_) => {
                self.finalize();
                self.squeeze(out)
            }
            Shake256Inner::Squeezing(r) => r.read(out),
        }
    }

    pub fn squeeze_blocks(&mut self, nblocks: usize, out: &mut [u8]) {
        self.squeeze(&mut out[..nblocks * SHAKE256_RATE]);
    }
}

/// stream128(seed, nonce): SHAKE128 keyed by a 32-byte seed and a 16-bit
/// little-endian nonce, used by `Poly::uniform` / ExpandA.
pub fn stream128_init(seed: &[u8], nonce: u16) -> Shake128State {
    let mut st = Shake128State::default();
    st.absorb(seed);
    st.absorb(&nonce.to_le_bytes());
    st.finalize();
    st
}

/// stream256(seed, nonce): SHAKE256 keyed by a (32 or 64-byte) seed and a
/// 16-bit little-endian nonce, used by the eta/gamma1 samplers.
pub fn stream256_init(seed: &[u8], nonce: u16) -> Shake256State {
    let mut st = Shake256State::default();
    st.absorb(seed);
    st.absorb(&nonce.to_le_bytes());
    st.finalize();
    st
}

/// One-shot SHAKE256(input) -> out, zero incremental state retained.
pub fn shake256(input: &[u8], out: &mut [u8]) {
    let mut h = Shake256::default();
    Update::update(&mut h, input);
    let mut reader = h.finalize_xof();
    reader.read(out);
}

/// One-shot SHAKE128(input) -> out, zero incremental state retained.
pub fn shake128(input: &[u8], out: &mut [u8]) {
    let mut h = Shake128::default();
    Update::update(&mut h, input);
    let mut reader = h.finalize_xof();
    reader.read(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake256_empty_spot_check() {
        let mut out = [0u8; 16];
        shake256(b"", &mut out);
        assert_eq!(hex::encode(out), "46b9dd2b0ba88d13233b3feb743eeb24");
    }

    #[test]
    fn shake128_empty_spot_check() {
        let mut out = [0u8; 16];
        shake128(b"", &mut out);
        assert_eq!(hex::encode(out), "7f9c2ba4e88f827d616045507605853e");
    }

    #[test]
    fn incremental_absorb_matches_one_shot() {
        let mut one_shot = [0u8; 32];
        shake256(b"Hello, World!", &mut one_shot);

        let mut st = Shake256State::default();
        st.absorb(b"Hello, ");
        st.absorb(b"World!");
        st.finalize();
        let mut incremental = [0u8; 32];
        st.squeeze(&mut incremental);

        assert_eq!(one_shot, incremental);
    }

    #[test]
    fn squeeze_can_be_called_multiple_times() {
        let mut whole = [0u8; 64];
        shake256(b"squeeze in parts", &mut whole);

        let mut st = Shake256State::default();
        st.absorb(b"squeeze in parts");
        st.finalize();
        let mut first = [0u8; 32];
        let mut second = [0u8; 32];
        st.squeeze(&mut first);
        st.squeeze(&mut second);

        assert_eq!(&whole[..32], &first[..]);
        assert_eq!(&whole[32..], &second[..]);
    }
}
