// This module was originally derived from CRYSTALS-Dilithium
// Source: https://github.com/Quantum-Blockchains/dilithium
// Which itself was ported from: https://github.com/pq-crystals/dilithium
// Original implementation by: Quantum Blockchains (https://www.quantumblockchains.io/)
//
// Generalized to take a runtime Params value instead of hard-coded L5
// constants, and to report malformed hint encodings as a typed error
// instead of a bare bool.
// Copyright (C) 2025 Fran Luis Vazquez Alonso

use crate::error::DilithiumError;
use crate::params::{Params, N, SEEDBYTES};
use crate::poly;
use crate::polyvec::{PolyVecK, PolyVecL};

/// Bit-pack public key pk = (rho, t1).
pub fn pack_pk(pk: &mut [u8], rho: &[u8], t1: &PolyVecK, params: &Params) {
    pk[..SEEDBYTES].copy_from_slice(&rho[..SEEDBYTES]);
    for i in 0..params.k {
        poly::t1_pack(
            &mut pk[SEEDBYTES + i * crate::params::POLYT1_PACKEDBYTES..],
            &t1.vec[i],
        );
    }
}

/// Unpack public key pk = (rho, t1).
pub fn unpack_pk(rho: &mut [u8], t1: &mut PolyVecK, pk: &[u8], params: &Params) {
    rho[..SEEDBYTES].copy_from_slice(&pk[..SEEDBYTES]);
    for i in 0..params.k {
        poly::t1_unpack(
            &mut t1.vec[i],
            &pk[SEEDBYTES + i * crate::params::POLYT1_PACKEDBYTES..],
        );
    }
}

/// Bit-pack secret key sk = (rho, key, tr, s1, s2, t0).
pub fn pack_sk(
    sk: &mut [u8],
    rho: &[u8],
    tr: &[u8],
    key: &[u8],
    t0: &PolyVecK,
    s1: &PolyVecL,
    s2: &PolyVecK,
    params: &Params,
) {
    sk[..SEEDBYTES].copy_from_slice(&rho[..SEEDBYTES]);
    let mut idx = SEEDBYTES;

    sk[idx..idx + SEEDBYTES].copy_from_slice(&key[..SEEDBYTES]);
    idx += SEEDBYTES;

    sk[idx..idx + SEEDBYTES].copy_from_slice(&tr[..SEEDBYTES]);
    idx += SEEDBYTES;

    for i in 0..params.l {
        poly::eta_pack(
            &mut sk[idx + i * params.poly_eta_packedbytes..],
            &s1.vec[i],
            params.eta,
        );
    }
    idx += params.l * params.poly_eta_packedbytes;

    for i in 0..params.k {
        poly::eta_pack(
            &mut sk[idx + i * params.poly_eta_packedbytes..],
            &s2.vec[i],
            params.eta,
        );
    }
    idx += params.k * params.poly_eta_packedbytes;

    for i in 0..params.k {
        poly::t0_pack(
            &mut sk[idx + i * crate::params::POLYT0_PACKEDBYTES..],
            &t0.vec[i],
        );
    }
}

/// Unpack secret key sk = (rho, key, tr, s1, s2, t0).
pub fn unpack_sk(
    rho: &mut [u8],
    tr: &mut [u8],
    key: &mut [u8],
    t0: &mut PolyVecK,
    s1: &mut PolyVecL,
    s2: &mut PolyVecK,
    sk: &[u8],
    params: &Params,
) {
    rho[..SEEDBYTES].copy_from_slice(&sk[..SEEDBYTES]);
    let mut idx = SEEDBYTES;

    key[..SEEDBYTES].copy_from_slice(&sk[idx..idx + SEEDBYTES]);
    idx += SEEDBYTES;

    tr[..SEEDBYTES].copy_from_slice(&sk[idx..idx + SEEDBYTES]);
    idx += SEEDBYTES;

    for i in 0..params.l {
        poly::eta_unpack(
            &mut s1.vec[i],
            &sk[idx + i * params.poly_eta_packedbytes..],
            params.eta,
        );
    }
    idx += params.l * params.poly_eta_packedbytes;

    for i in 0..params.k {
        poly::eta_unpack(
            &mut s2.vec[i],
            &sk[idx + i * params.poly_eta_packedbytes..],
            params.eta,
        );
    }
    idx += params.k * params.poly_eta_packedbytes;

    for i in 0..params.k {
        poly::t0_unpack(
            &mut t0.vec[i],
            &sk[idx + i * crate::params::POLYT0_PACKEDBYTES..],
        );
    }
}

/// Bit-pack signature sig = (c~, z, h).
pub fn pack_sig(sig: &mut [u8], c_tilde: &[u8], z: &PolyVecL, h: &PolyVecK, params: &Params) {
    sig[..SEEDBYTES].copy_from_slice(&c_tilde[..SEEDBYTES]);

    let mut idx = SEEDBYTES;
    for i in 0..params.l {
        poly::z_pack(
            &mut sig[idx + i * params.poly_z_packedbytes..],
            &z.vec[i],
            params.gamma1,
        );
    }
    idx += params.l * params.poly_z_packedbytes;

    for b in sig[idx..idx + params.omega + params.k].iter_mut() {
        *b = 0;
    }

    let mut k = 0usize;
    for i in 0..params.k {
        for j in 0..N {
            if h.vec[i].coeffs[j] != 0 {
                sig[idx + k] = j as u8;
                k += 1;
            }
        }
        sig[idx + params.omega + i] = k as u8;
    }
}

/// Unpack signature sig = (c~, z, h). Returns `InvalidSignatureEncoding` if
/// the hint section is malformed: cumulative counts out of order or
/// exceeding omega, indices not strictly increasing within a polynomial, or
/// non-zero padding in unused slots.
pub fn unpack_sig(
    c_tilde: &mut [u8],
    z: &mut PolyVecL,
    h: &mut PolyVecK,
    sig: &[u8],
    params: &Params,
) -> Result<(), DilithiumError> {
    c_tilde[..SEEDBYTES].copy_from_slice(&sig[..SEEDBYTES]);

    let mut idx = SEEDBYTES;
    for i in 0..params.l {
        poly::z_unpack(
            &mut z.vec[i],
            &sig[idx + i * params.poly_z_packedbytes..],
            params.gamma1,
        );
    }
    idx += params.l * params.poly_z_packedbytes;

    for p in h.vec.iter_mut() {
        p.coeffs.fill(0);
    }

    let mut k: usize = 0;
    for i in 0..params.k {
        let cnt = sig[idx + params.omega + i] as usize;
        if cnt < k || cnt > params.omega {
            return Err(DilithiumError::InvalidSignatureEncoding);
        }
        for j in k..cnt {
            if j > k && sig[idx + j] <= sig[idx + j - 1] {
                return Err(DilithiumError::InvalidSignatureEncoding);
            }
            h.vec[i].coeffs[sig[idx + j] as usize] = 1;
        }
        k = cnt;
    }

    for j in k..params.omega {
        if sig[idx + j] != 0 {
            return Err(DilithiumError::InvalidSignatureEncoding);
        }
    }

    Ok(())
}

/// Bit-pack w1 for every polynomial of the vector, concatenated. Used only
/// to feed the challenge hash; w1 is never unpacked back, so there is no
/// paired decoder.
pub fn pack_w1(buf: &mut [u8], w1: &PolyVecK, params: &Params) {
    for i in 0..params.k {
        poly::w1_pack(
            &mut buf[i * params.poly_w1_packedbytes..],
            &w1.vec[i],
            params.gamma2,
        );
    }
}
