// This module was originally derived from CRYSTALS-Dilithium
// Source: https://github.com/Quantum-Blockchains/dilithium
// Which itself was ported from: https://github.com/pq-crystals/dilithium
// Original implementation by: Quantum Blockchains (https://www.quantumblockchains.io/)
//
// Implements the reference KeyGen / Sign (Fiat-Shamir with Aborts) / Verify
// orchestration, generalized to a runtime `Params` the way the sibling
// modules are, and wired through this crate's own `SeedSource`/
// `DilithiumError` seams.
// Copyright (C) 2025 Fran Luis Vazquez Alonso

use subtle::ConstantTimeEq;

use crate::error::DilithiumError;
use crate::keys::{PublicKey, SecretKey, Signature};
use crate::params::{Level, Params, CRHBYTES, SEEDBYTES};
use crate::poly::{self, Poly};
use crate::polyvec::{self, Matrix, PolyVecK, PolyVecL};
use crate::rng::SeedSource;
use crate::sponge::shake256;

/// Defensive cap on Sign's rejection loop (§9). Only reachable with a
/// broken entropy source; a sound one succeeds in 4-7 iterations on
/// average.
const MAX_SIGN_ATTEMPTS: u32 = 1024;

/// Generate a keypair for `level`, drawing the 32-byte seed from `rng` when
/// `seed` is `None`. Passing an explicit seed makes this deterministic and
/// is the only mode exercised by KAT-style fixtures.
pub fn keygen_with_rng(
    level: Level,
    seed: Option<[u8; SEEDBYTES]>,
    rng: &mut impl SeedSource,
) -> Result<(PublicKey, SecretKey), DilithiumError> {
    let params = level.params();

    let zeta = match seed {
        Some(z) => z,
        None => {
            let mut z = [0u8; SEEDBYTES];
            rng.fill(&mut z);
            z
        }
    };

    let mut seedbuf = [0u8; 2 * SEEDBYTES + CRHBYTES];
    shake256(&zeta, &mut seedbuf);
    let rho = &seedbuf[..SEEDBYTES];
    let rhoprime = &seedbuf[SEEDBYTES..SEEDBYTES + CRHBYTES];
    let key = &seedbuf[SEEDBYTES + CRHBYTES..];

    let mat = polyvec::expand_a(rho, &params);

    let mut s1 = PolyVecL::new(params.l);
    for i in 0..params.l {
        poly::uniform_eta(&mut s1.vec[i], rhoprime, i as u16, params.eta);
    }
    let mut s2 = PolyVecK::new(params.k);
    for i in 0..params.k {
        poly::uniform_eta(&mut s2.vec[i], rhoprime, (params.l + i) as u16, params.eta);
    }

    let mut s1hat = s1.clone();
    polyvec::l_ntt(&mut s1hat);

    let mut t = polyvec::matrix_mul(&mat, &s1hat, &params);
    polyvec::k_reduce(&mut t);
    polyvec::k_invntt_tomont(&mut t);
    polyvec::k_add_ip(&mut t, &s2);
    polyvec::k_caddq(&mut t);

    let mut t0 = PolyVecK::new(params.k);
    polyvec::k_power2round(&mut t, &mut t0);
    let t1 = t;

    let mut pk_bytes = vec![0u8; params.public_key_bytes];
    crate::packing::pack_pk(&mut pk_bytes, rho, &t1, &params);

    let mut tr = [0u8; SEEDBYTES];
    shake256(&pk_bytes, &mut tr);

    let mut sk_bytes = vec![0u8; params.secret_key_bytes];
    crate::packing::pack_sk(&mut sk_bytes, rho, &tr, key, &t0, &s1, &s2, &params);

    Ok((
        PublicKey::from_parts(level, pk_bytes),
        SecretKey::from_parts(level, sk_bytes),
    ))
}

/// `keygen` with the operating system's CSPRNG as the entropy source.
pub fn keygen(
    level: Level,
    seed: Option<[u8; SEEDBYTES]>,
) -> Result<(PublicKey, SecretKey), DilithiumError> {
    keygen_with_rng(level, seed, &mut rand::rngs::OsRng)
}

struct Unpacked {
    rho: [u8; SEEDBYTES],
    tr: [u8; SEEDBYTES],
    key: [u8; SEEDBYTES],
    t0: PolyVecK,
    s1: PolyVecL,
    s2: PolyVecK,
}

fn unpack_secret_key(sk: &SecretKey, params: &Params) -> Unpacked {
    let mut rho = [0u8; SEEDBYTES];
    let mut tr = [0u8; SEEDBYTES];
    let mut key = [0u8; SEEDBYTES];
    let mut t0 = PolyVecK::new(params.k);
    let mut s1 = PolyVecL::new(params.l);
    let mut s2 = PolyVecK::new(params.k);
    crate::packing::unpack_sk(
        &mut rho,
        &mut tr,
        &mut key,
        &mut t0,
        &mut s1,
        &mut s2,
        sk.as_bytes(),
        params,
    );
    Unpacked {
        rho,
        tr,
        key,
        t0,
        s1,
        s2,
    }
}

/// One attempt of the Fiat-Shamir-with-Aborts loop. `Ok(None)` means this
/// attempt must be rejected and retried; `Ok(Some(..))` carries the bytes of
/// a valid signature.
#[allow(clippy::too_many_arguments)]
fn sign_attempt(
    params: &Params,
    mat: &Matrix,
    mu: &[u8; CRHBYTES],
    rhoprime: &[u8],
    s1hat: &PolyVecL,
    s2hat: &PolyVecK,
    t0hat: &PolyVecK,
    kappa: u32,
) -> Option<Vec<u8>> {
    let mut y = PolyVecL::new(params.l);
    for i in 0..params.l {
        let nonce = (params.l as u32 * kappa + i as u32) as u16;
        poly::uniform_gamma1(&mut y.vec[i], rhoprime, nonce, params.gamma1);
    }

    let mut yhat = y.clone();
    polyvec::l_ntt(&mut yhat);
    let mut w = polyvec::matrix_mul(mat, &yhat, params);
    polyvec::k_reduce(&mut w);
    polyvec::k_invntt_tomont(&mut w);
    polyvec::k_caddq(&mut w);

    let mut w1 = w.clone();
    let mut w0 = PolyVecK::new(params.k);
    polyvec::k_decompose(&mut w1, &mut w0, params.gamma2);

    let mut w1_packed = vec![0u8; params.k * params.poly_w1_packedbytes];
    crate::packing::pack_w1(&mut w1_packed, &w1, params);

    let mut c_tilde = [0u8; SEEDBYTES];
    {
        let mut hasher_input = Vec::with_capacity(CRHBYTES + w1_packed.len());
        hasher_input.extend_from_slice(mu);
        hasher_input.extend_from_slice(&w1_packed);
        shake256(&hasher_input, &mut c_tilde);
    }

    let mut c = Poly::default();
    poly::challenge(&mut c, &c_tilde, params.tau);
    let mut chat = c;
    poly::ntt(&mut chat);

    let mut z = PolyVecL::new(params.l);
    polyvec::l_pointwise_poly_montgomery(&mut z, &chat, s1hat);
    polyvec::l_invntt_tomont(&mut z);
    polyvec::l_add_ip(&mut z, &y);
    polyvec::l_reduce(&mut z);
    if polyvec::l_chknorm(&z, params.gamma1 - params.beta) != 0 {
        return None;
    }

    let mut cs2 = PolyVecK::new(params.k);
    polyvec::k_pointwise_poly_montgomery(&mut cs2, &chat, s2hat);
    polyvec::k_invntt_tomont(&mut cs2);
    let mut r0 = w0;
    polyvec::k_sub_ip(&mut r0, &cs2);
    polyvec::k_reduce(&mut r0);
    if polyvec::k_chknorm(&r0, params.gamma2 - params.beta) != 0 {
        return None;
    }

    let mut ct0 = PolyVecK::new(params.k);
    polyvec::k_pointwise_poly_montgomery(&mut ct0, &chat, t0hat);
    polyvec::k_invntt_tomont(&mut ct0);
    polyvec::k_reduce(&mut ct0);
    if polyvec::k_chknorm(&ct0, params.gamma2) != 0 {
        return None;
    }

    polyvec::k_add_ip(&mut r0, &ct0);
    let mut h = PolyVecK::new(params.k);
    let popcount = polyvec::k_make_hint(&mut h, &r0, &w1, params.gamma2);
    if popcount as usize > params.omega {
        return None;
    }

    let mut sig = vec![0u8; params.signature_bytes];
    crate::packing::pack_sig(&mut sig, &c_tilde, &z, &h, params);
    Some(sig)
}

/// Deterministic signing: fixed `(sk, msg)` produces the same signature
/// every time, the only mode the reference's KAT vectors exercise.
pub fn sign(level: Level, sk: &SecretKey, msg: &[u8]) -> Result<Signature, DilithiumError> {
    let params = level.params();
    let unpacked = unpack_secret_key(sk, &params);

    let mut mu = [0u8; CRHBYTES];
    {
        let mut input = Vec::with_capacity(SEEDBYTES + msg.len());
        input.extend_from_slice(&unpacked.tr);
        input.extend_from_slice(msg);
        shake256(&input, &mut mu);
    }

    let mut rhoprime = [0u8; CRHBYTES];
    {
        let mut input = Vec::with_capacity(SEEDBYTES + CRHBYTES);
        input.extend_from_slice(&unpacked.key);
        input.extend_from_slice(&mu);
        shake256(&input, &mut rhoprime);
    }

    sign_with_masking_seed(level, &unpacked, &mu, &rhoprime)
}

/// Non-deterministic signing (§4.9 open question): identical to `sign`
/// except the masking seed rho'' is drawn from `rng` instead of derived
/// from `key` and `mu`. Not exercised by byte-exact KAT-style vectors.
pub fn sign_nondeterministic(
    level: Level,
    sk: &SecretKey,
    msg: &[u8],
    rng: &mut impl SeedSource,
) -> Result<Signature, DilithiumError> {
    let params = level.params();
    let unpacked = unpack_secret_key(sk, &params);

    let mut mu = [0u8; CRHBYTES];
    {
        let mut input = Vec::with_capacity(SEEDBYTES + msg.len());
        input.extend_from_slice(&unpacked.tr);
        input.extend_from_slice(msg);
        shake256(&input, &mut mu);
    }

    let mut rhoprime = [0u8; CRHBYTES];
    rng.fill(&mut rhoprime);

    sign_with_masking_seed(level, &unpacked, &mu, &rhoprime)
}

fn sign_with_masking_seed(
    level: Level,
    unpacked: &Unpacked,
    mu: &[u8; CRHBYTES],
    rhoprime: &[u8; CRHBYTES],
) -> Result<Signature, DilithiumError> {
    let params = level.params();
    let mat = polyvec::expand_a(&unpacked.rho, &params);

    let mut s1hat = unpacked.s1.clone();
    polyvec::l_ntt(&mut s1hat);
    let mut s2hat = unpacked.s2.clone();
    polyvec::k_ntt(&mut s2hat);
    let mut t0hat = unpacked.t0.clone();
    polyvec::k_ntt(&mut t0hat);

    for kappa in 0..MAX_SIGN_ATTEMPTS {
        if let Some(sig_bytes) = sign_attempt(
            &params, &mat, mu, rhoprime, &s1hat, &s2hat, &t0hat, kappa,
        ) {
            return Ok(Signature::from_parts(level, sig_bytes));
        }
    }

    Err(DilithiumError::SamplerExhausted)
}

/// Verify `sig` against `msg` under `pk`. Returns `false` for every
/// rejection reason (§7): the three internal failure kinds are not
/// distinguished here, matching the reference's "invalid signature" verdict.
pub fn verify(level: Level, pk: &PublicKey, msg: &[u8], sig: &Signature) -> bool {
    try_verify(level, pk, msg, sig).unwrap_or(false)
}

fn try_verify(
    level: Level,
    pk: &PublicKey,
    msg: &[u8],
    sig: &Signature,
) -> Result<bool, DilithiumError> {
    let params = level.params();
    if pk.as_bytes().len() != params.public_key_bytes {
        return Err(DilithiumError::InvalidInputLength);
    }
    if sig.as_bytes().len() != params.signature_bytes {
        return Err(DilithiumError::InvalidInputLength);
    }

    let mut rho = [0u8; SEEDBYTES];
    let mut t1 = PolyVecK::new(params.k);
    crate::packing::unpack_pk(&mut rho, &mut t1, pk.as_bytes(), &params);

    let mut c_tilde = [0u8; SEEDBYTES];
    let mut z = PolyVecL::new(params.l);
    let mut h = PolyVecK::new(params.k);
    crate::packing::unpack_sig(&mut c_tilde, &mut z, &mut h, sig.as_bytes(), &params)?;

    if polyvec::l_chknorm(&z, params.gamma1 - params.beta) != 0 {
        return Ok(false);
    }

    let mut tr = [0u8; SEEDBYTES];
    shake256(pk.as_bytes(), &mut tr);
    let mut mu = [0u8; CRHBYTES];
    {
        let mut input = Vec::with_capacity(SEEDBYTES + msg.len());
        input.extend_from_slice(&tr);
        input.extend_from_slice(msg);
        shake256(&input, &mut mu);
    }

    let mut c = Poly::default();
    poly::challenge(&mut c, &c_tilde, params.tau);
    let mut chat = c;
    poly::ntt(&mut chat);

    let mat = polyvec::expand_a(&rho, &params);
    let mut zhat = z;
    polyvec::l_ntt(&mut zhat);
    let mut az = polyvec::matrix_mul(&mat, &zhat, &params);

    let mut t1_shifted = t1;
    polyvec::k_shiftl(&mut t1_shifted);
    polyvec::k_ntt(&mut t1_shifted);
    let mut ct1 = PolyVecK::new(params.k);
    polyvec::k_pointwise_poly_montgomery(&mut ct1, &chat, &t1_shifted);

    polyvec::k_sub_ip(&mut az, &ct1);
    polyvec::k_reduce(&mut az);
    polyvec::k_invntt_tomont(&mut az);
    polyvec::k_caddq(&mut az);

    let mut w1p = PolyVecK::new(params.k);
    polyvec::k_use_hint(&mut w1p, &az, &h, params.gamma2);

    let mut w1_packed = vec![0u8; params.k * params.poly_w1_packedbytes];
    crate::packing::pack_w1(&mut w1_packed, &w1p, &params);

    let mut c_tilde2 = [0u8; SEEDBYTES];
    {
        let mut input = Vec::with_capacity(CRHBYTES + w1_packed.len());
        input.extend_from_slice(&mu);
        input.extend_from_slice(&w1_packed);
        shake256(&input, &mut c_tilde2);
    }

    if bool::from(c_tilde[..].ct_eq(&c_tilde2[..])) {
        Ok(true)
    } else {
        Err(DilithiumError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keygen_is_deterministic_given_a_seed() {
        let seed = [42u8; SEEDBYTES];
        let (pk1, sk1) = keygen(Level::L2, Some(seed)).unwrap();
        let (pk2, sk2) = keygen(Level::L2, Some(seed)).unwrap();
        assert_eq!(pk1.as_bytes(), pk2.as_bytes());
        assert_eq!(sk1.as_bytes(), sk2.as_bytes());
    }

    #[test]
    fn keygen_produces_declared_sizes_for_every_level() {
        for level in [Level::L2, Level::L3, Level::L5] {
            let params = level.params();
            let (pk, sk) = keygen(level, Some([7u8; SEEDBYTES])).unwrap();
            assert_eq!(pk.as_bytes().len(), params.public_key_bytes);
            assert_eq!(sk.as_bytes().len(), params.secret_key_bytes);
        }
    }

    #[test]
    fn sign_then_verify_round_trips_for_every_level() {
        for level in [Level::L2, Level::L3, Level::L5] {
            let (pk, sk) = keygen(level, Some([1u8; SEEDBYTES])).unwrap();
            let msg = b"the quick brown fox jumps over the lazy dog";
            let sig = sign(level, &sk, msg).unwrap();
            assert!(verify(level, &pk, msg, &sig));
        }
    }

    #[test]
    fn sign_is_deterministic() {
        let (_, sk) = keygen(Level::L3, Some([9u8; SEEDBYTES])).unwrap();
        let msg = b"reproduce me";
        let sig1 = sign(Level::L3, &sk, msg).unwrap();
        let sig2 = sign(Level::L3, &sk, msg).unwrap();
        assert_eq!(sig1.as_bytes(), sig2.as_bytes());
    }

    #[test]
    fn tampering_with_signature_is_rejected() {
        let (pk, sk) = keygen(Level::L2, Some([3u8; SEEDBYTES])).unwrap();
        let msg = b"do not touch this message";
        let sig = sign(Level::L2, &sk, msg).unwrap();

        let mut tampered = sig.as_bytes().to_vec();
        *tampered.last_mut().unwrap() ^= 0x01;
        let tampered_sig = Signature::from_bytes(Level::L2, &tampered).unwrap();
        assert!(!verify(Level::L2, &pk, msg, &tampered_sig));
    }

    #[test]
    fn tampering_with_message_is_rejected() {
        let (pk, sk) = keygen(Level::L5, Some([4u8; SEEDBYTES])).unwrap();
        let msg = b"original message";
        let sig = sign(Level::L5, &sk, msg).unwrap();
        assert!(!verify(Level::L5, &pk, b"altered message", &sig));
    }

    #[test]
    fn cross_level_signature_is_rejected_as_wrong_length() {
        let (pk, sk) = keygen(Level::L2, Some([5u8; SEEDBYTES])).unwrap();
        let msg = b"cross level";
        let sig = sign(Level::L2, &sk, msg).unwrap();

        // An L2 signature is the wrong length for L3's declared size, so
        // `Signature::from_bytes` itself rejects it before `verify` runs.
        assert!(Signature::from_bytes(Level::L3, sig.as_bytes()).is_err());
        assert!(verify(Level::L2, &pk, msg, &sig));
    }

    #[test]
    fn random_signature_of_correct_length_is_rejected() {
        let (pk, _) = keygen(Level::L3, Some([6u8; SEEDBYTES])).unwrap();
        let params = Level::L3.params();
        let bogus = Signature::from_bytes(Level::L3, &vec![0x5A; params.signature_bytes]).unwrap();
        assert!(!verify(Level::L3, &pk, b"anything", &bogus));
    }

    #[test]
    fn nondeterministic_sign_still_verifies() {
        use rand::rngs::OsRng;
        let (pk, sk) = keygen(Level::L2, Some([8u8; SEEDBYTES])).unwrap();
        let msg = b"nondeterministic path";
        let sig = sign_nondeterministic(Level::L2, &sk, msg, &mut OsRng).unwrap();
        assert!(verify(Level::L2, &pk, msg, &sig));
    }
}
