// This module was originally derived from CRYSTALS-Dilithium
// Source: https://github.com/Quantum-Blockchains/dilithium
// Which itself was ported from: https://github.com/pq-crystals/dilithium
// Original implementation by: Quantum Blockchains (https://www.quantumblockchains.io/)
//
// Generalized to cover all three NIST security levels.
// Copyright (C) 2025 Fran Luis Vazquez Alonso

//! Runtime-selectable parameter sets for the three Dilithium security levels.
//!
//! The reference groups these as compile-time constants per level. Here they
//! are fields of a [`Params`] value derived from a [`Level`], so a single
//! binary can serve all three levels and so the active parameter set is an
//! ordinary argument rather than hidden global state.

/// Prime defining the field Z_q.
pub const Q: i32 = (1 << 23) - (1 << 13) + 1;
/// Ring defining polynomial degree X^N + 1.
pub const N: usize = 256;
/// Number of bits dropped by Power2Round.
pub const D: i32 = 13;

pub const SEEDBYTES: usize = 32;
pub const CRHBYTES: usize = 64;

pub const SHAKE128_RATE: usize = 168;
pub const SHAKE256_RATE: usize = 136;

pub const POLYT1_PACKEDBYTES: usize = 320;
pub const POLYT0_PACKEDBYTES: usize = 416;

/// Security level, selecting one of the three NIST-specified parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    L2,
    L3,
    L5,
}

impl Level {
    pub fn params(self) -> Params {
        Params::for_level(self)
    }
}

/// The full parameter set for one security level.
///
/// Cheap to copy: a handful of `usize`/`i32` fields, never held as shared
/// mutable state. Every entry point in this crate takes a `Level` (or a
/// `Params` derived from one) as an explicit argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub level: Level,
    /// Rows of the public matrix A / length of PolyVecK.
    pub k: usize,
    /// Columns of the public matrix A / length of PolyVecL.
    pub l: usize,
    /// Secret-coefficient bound.
    pub eta: i32,
    /// Number of nonzero coefficients in the challenge polynomial.
    pub tau: usize,
    /// beta = tau * eta.
    pub beta: i32,
    /// Masking range.
    pub gamma1: i32,
    /// Low-order rounding range.
    pub gamma2: i32,
    /// Hint-weight cap.
    pub omega: usize,

    pub poly_eta_packedbytes: usize,
    pub poly_w1_packedbytes: usize,
    pub poly_z_packedbytes: usize,
    pub polyvech_packedbytes: usize,

    pub public_key_bytes: usize,
    pub secret_key_bytes: usize,
    pub signature_bytes: usize,
}

impl Params {
    pub const fn for_level(level: Level) -> Self {
        match level {
            Level::L2 => {
                const K: usize = 4;
                const L: usize = 4;
                const ETA: i32 = 2;
                const TAU: usize = 39;
                const GAMMA1: i32 = 1 << 17;
                const GAMMA2: i32 = (Q - 1) / 88;
                const OMEGA: usize = 80;
                const POLYETA_PACKEDBYTES: usize = 96;
                const POLYW1_PACKEDBYTES: usize = 192;
                const POLYZ_PACKEDBYTES: usize = 576;
                Params {
                    level,
                    k: K,
                    l: L,
                    eta: ETA,
                    tau: TAU,
                    beta: (TAU as i32) * ETA,
                    gamma1: GAMMA1,
                    gamma2: GAMMA2,
                    omega: OMEGA,
                    poly_eta_packedbytes: POLYETA_PACKEDBYTES,
                    poly_w1_packedbytes: POLYW1_PACKEDBYTES,
                    poly_z_packedbytes: POLYZ_PACKEDBYTES,
                    polyvech_packedbytes: OMEGA + K,
                    public_key_bytes: SEEDBYTES + K * POLYT1_PACKEDBYTES,
                    secret_key_bytes: 3 * SEEDBYTES
                        + (K + L) * POLYETA_PACKEDBYTES
                        + K * POLYT0_PACKEDBYTES,
                    signature_bytes: SEEDBYTES + L * POLYZ_PACKEDBYTES + OMEGA + K,
                }
            }
            Level::L3 => {
                const K: usize = 6;
                const L: usize = 5;
                const ETA: i32 = 4;
                const TAU: usize = 49;
                const GAMMA1: i32 = 1 << 19;
                const GAMMA2: i32 = (Q - 1) / 32;
                const OMEGA: usize = 55;
                const POLYETA_PACKEDBYTES: usize = 128;
                const POLYW1_PACKEDBYTES: usize = 128;
                const POLYZ_PACKEDBYTES: usize = 640;
                Params {
                    level,
                    k: K,
                    l: L,
                    eta: ETA,
                    tau: TAU,
                    beta: (TAU as i32) * ETA,
                    gamma1: GAMMA1,
                    gamma2: GAMMA2,
                    omega: OMEGA,
                    poly_eta_packedbytes: POLYETA_PACKEDBYTES,
                    poly_w1_packedbytes: POLYW1_PACKEDBYTES,
                    poly_z_packedbytes: POLYZ_PACKEDBYTES,
                    polyvech_packedbytes: OMEGA + K,
                    public_key_bytes: SEEDBYTES + K * POLYT1_PACKEDBYTES,
                    secret_key_bytes: 3 * SEEDBYTES
                        + (K + L) * POLYETA_PACKEDBYTES
                        + K * POLYT0_PACKEDBYTES,
                    signature_bytes: SEEDBYTES + L * POLYZ_PACKEDBYTES + OMEGA + K,
                }
            }
            Level::L5 => {
                const K: usize = 8;
                const L: usize = 7;
                const ETA: i32 = 2;
                const TAU: usize = 60;
                const GAMMA1: i32 = 1 << 19;
                const GAMMA2: i32 = (Q - 1) / 32;
                const OMEGA: usize = 75;
                const POLYETA_PACKEDBYTES: usize = 96;
                const POLYW1_PACKEDBYTES: usize = 128;
                const POLYZ_PACKEDBYTES: usize = 640;
                Params {
                    level,
                    k: K,
                    l: L,
                    eta: ETA,
                    tau: TAU,
                    beta: (TAU as i32) * ETA,
                    gamma1: GAMMA1,
                    gamma2: GAMMA2,
                    omega: OMEGA,
                    poly_eta_packedbytes: POLYETA_PACKEDBYTES,
                    poly_w1_packedbytes: POLYW1_PACKEDBYTES,
                    poly_z_packedbytes: POLYZ_PACKEDBYTES,
                    polyvech_packedbytes: OMEGA + K,
                    public_key_bytes: SEEDBYTES + K * POLYT1_PACKEDBYTES,
                    secret_key_bytes: 3 * SEEDBYTES
                        + (K + L) * POLYETA_PACKEDBYTES
                        + K * POLYT0_PACKEDBYTES,
                    signature_bytes: SEEDBYTES + L * POLYZ_PACKEDBYTES + OMEGA + K,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_sizes_match_spec_table() {
        let p2 = Params::for_level(Level::L2);
        assert_eq!(p2.public_key_bytes, 1312);
        assert_eq!(p2.secret_key_bytes, 2528);
        assert_eq!(p2.signature_bytes, 2420);

        let p3 = Params::for_level(Level::L3);
        assert_eq!(p3.public_key_bytes, 1952);
        assert_eq!(p3.secret_key_bytes, 4016);
        assert_eq!(p3.signature_bytes, 3293);

        let p5 = Params::for_level(Level::L5);
        assert_eq!(p5.public_key_bytes, 2592);
        assert_eq!(p5.secret_key_bytes, 4864);
        assert_eq!(p5.signature_bytes, 4595);
    }
}
