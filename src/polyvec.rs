// k- and l-length vectors of polynomials, matrix expansion, and the lifted
// per-coefficient operations applied across a whole vector. Written in the
// same per-coefficient, self-mutating style as poly.rs, generalized to
// runtime-length vectors (Vec<Poly>) since k and l vary by security level.
// Copyright (C) 2025 Fran Luis Vazquez Alonso

use crate::params::Params;
use crate::poly::{self, Poly};

/// A vector of `l` polynomials (the dimension of the secret/response space).
#[derive(Clone)]
pub struct PolyVecL {
    pub vec: Vec<Poly>,
}

/// A vector of `k` polynomials (the dimension of the public-commitment space).
#[derive(Clone)]
pub struct PolyVecK {
    pub vec: Vec<Poly>,
}

impl PolyVecL {
    pub fn new(l: usize) -> Self {
        PolyVecL {
            vec: vec![Poly::default(); l],
        }
    }
}

impl PolyVecK {
    pub fn new(k: usize) -> Self {
        PolyVecK {
            vec: vec![Poly::default(); k],
        }
    }
}

/// k x l matrix of polynomials, in NTT domain after `expand_a`.
pub struct Matrix {
    pub rows: Vec<PolyVecL>,
}

/// ExpandA(rho): deterministically expand a 32-byte seed into the public
/// k x l matrix A, one polynomial per (row, column) via `Poly::uniform`
/// keyed by nonce = (i << 8) | j.
pub fn expand_a(rho: &[u8], params: &Params) -> Matrix {
    let mut rows = Vec::with_capacity(params.k);
    for i in 0..params.k {
        let mut row = PolyVecL::new(params.l);
        for j in 0..params.l {
            let nonce = ((i as u16) << 8) | (j as u16);
            poly::uniform(&mut row.vec[j], rho, nonce);
        }
        rows.push(row);
    }
    Matrix { rows }
}

/// t = A . v, accumulated with Montgomery pointwise multiplication. Both A
/// and v must already be in NTT domain; t is returned in NTT domain too.
pub fn matrix_mul(a: &Matrix, v: &PolyVecL, params: &Params) -> PolyVecK {
    let mut t = PolyVecK::new(params.k);
    for i in 0..params.k {
        let mut acc = Poly::default();
        let mut term = Poly::default();
        poly::pointwise_montgomery(&mut acc, &a.rows[i].vec[0], &v.vec[0]);
        for j in 1..params.l {
            poly::pointwise_montgomery(&mut term, &a.rows[i].vec[j], &v.vec[j]);
            poly::add_ip(&mut acc, &term);
        }
        t.vec[i] = acc;
    }
    t
}

pub fn l_ntt(v: &mut PolyVecL) {
    for p in v.vec.iter_mut() {
        poly::ntt(p);
    }
}

pub fn k_ntt(v: &mut PolyVecK) {
    for p in v.vec.iter_mut() {
        poly::ntt(p);
    }
}

pub fn l_invntt_tomont(v: &mut PolyVecL) {
    for p in v.vec.iter_mut() {
        poly::invntt_tomont(p);
    }
}

pub fn k_invntt_tomont(v: &mut PolyVecK) {
    for p in v.vec.iter_mut() {
        poly::invntt_tomont(p);
    }
}

pub fn l_reduce(v: &mut PolyVecL) {
    for p in v.vec.iter_mut() {
        poly::reduce(p);
    }
}

pub fn k_reduce(v: &mut PolyVecK) {
    for p in v.vec.iter_mut() {
        poly::reduce(p);
    }
}

pub fn k_caddq(v: &mut PolyVecK) {
    for p in v.vec.iter_mut() {
        poly::caddq(p);
    }
}

pub fn l_add_ip(a: &mut PolyVecL, b: &PolyVecL) {
    for i in 0..a.vec.len() {
        poly::add_ip(&mut a.vec[i], &b.vec[i]);
    }
}

pub fn k_add_ip(a: &mut PolyVecK, b: &PolyVecK) {
    for i in 0..a.vec.len() {
        poly::add_ip(&mut a.vec[i], &b.vec[i]);
    }
}

pub fn k_sub_ip(a: &mut PolyVecK, b: &PolyVecK) {
    for i in 0..a.vec.len() {
        poly::sub_ip(&mut a.vec[i], &b.vec[i]);
    }
}

/// Pointwise-multiply every polynomial of `v` (NTT domain) by the single
/// NTT-domain polynomial `c`, writing into `out`.
pub fn l_pointwise_poly_montgomery(out: &mut PolyVecL, c: &Poly, v: &PolyVecL) {
    for i in 0..v.vec.len() {
        poly::pointwise_montgomery(&mut out.vec[i], c, &v.vec[i]);
    }
}

pub fn k_pointwise_poly_montgomery(out: &mut PolyVecK, c: &Poly, v: &PolyVecK) {
    for i in 0..v.vec.len() {
        poly::pointwise_montgomery(&mut out.vec[i], c, &v.vec[i]);
    }
}

/// Check infinity norm of every polynomial in the vector against `bound`.
/// Returns 0 iff every polynomial passes, 1 otherwise.
pub fn l_chknorm(v: &PolyVecL, bound: i32) -> i32 {
    for p in v.vec.iter() {
        if poly::chknorm(p, bound) != 0 {
            return 1;
        }
    }
    0
}

pub fn k_chknorm(v: &PolyVecK, bound: i32) -> i32 {
    for p in v.vec.iter() {
        if poly::chknorm(p, bound) != 0 {
            return 1;
        }
    }
    0
}

pub fn k_power2round(t1: &mut PolyVecK, t0: &mut PolyVecK) {
    for i in 0..t1.vec.len() {
        poly::power2round(&mut t1.vec[i], &mut t0.vec[i]);
    }
}

pub fn k_decompose(w1: &mut PolyVecK, w0: &mut PolyVecK, gamma2: i32) {
    for i in 0..w1.vec.len() {
        poly::decompose(&mut w1.vec[i], &mut w0.vec[i], gamma2);
    }
}

/// Compute the hint vector for every polynomial of `a0`/`a1`, accumulating
/// the total popcount across all k polynomials.
pub fn k_make_hint(h: &mut PolyVecK, a0: &PolyVecK, a1: &PolyVecK, gamma2: i32) -> i32 {
    let mut total = 0;
    for i in 0..h.vec.len() {
        total += poly::make_hint(&mut h.vec[i], &a0.vec[i], &a1.vec[i], gamma2);
    }
    total
}

pub fn k_use_hint(out: &mut PolyVecK, a: &PolyVecK, hint: &PolyVecK, gamma2: i32) {
    for i in 0..out.vec.len() {
        out.vec[i] = a.vec[i];
        poly::use_hint(&mut out.vec[i], &hint.vec[i], gamma2);
    }
}

/// Multiply every polynomial of `v` by 2^D without modular reduction.
pub fn k_shiftl(v: &mut PolyVecK) {
    for p in v.vec.iter_mut() {
        poly::shiftl(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Level;

    #[test]
    fn expand_a_has_right_shape() {
        let params = Params::for_level(Level::L3);
        let rho = [3u8; 32];
        let a = expand_a(&rho, &params);
        assert_eq!(a.rows.len(), params.k);
        assert_eq!(a.rows[0].vec.len(), params.l);
    }

    #[test]
    fn expand_a_is_deterministic() {
        let params = Params::for_level(Level::L2);
        let rho = [9u8; 32];
        let a1 = expand_a(&rho, &params);
        let a2 = expand_a(&rho, &params);
        assert_eq!(a1.rows[1].vec[2].coeffs, a2.rows[1].vec[2].coeffs);
    }
}
