//! Symmetric/Hermitian right operands
//!
//! Three-stage fallback chain: Cholesky when the operand is positive
//! definite, an unpivoted LDL^H factorization for the indefinite case,
//! and the general pivoted-LU path when a tiny LDL^H pivot makes the
//! unpivoted factorization untrustworthy. A right operand that is
//! genuinely singular surfaces as a singularity error from whichever
//! stage reaches it.
//!
//! The transposed coefficient matrix `A = right^T` is the conjugate of a
//! Hermitian operand and therefore Hermitian itself, so the kernels only
//! ever read its lower triangle.

use super::{assemble, lu::lu_solve_in_place, max_modulus, require_square, singular_tolerance, transposed_system};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// Factor `a = G * G^H` in place (lower triangle), returning false when a
/// pivot is not strictly positive
fn try_cholesky<T: Scalar>(a: &mut [T], n: usize) -> bool {
    for k in 0..n {
        let mut d = a[k * n + k];
        for j in 0..k {
            let g = a[j * n + k];
            d = d - g * g.conj();
        }
        let d = d.re();
        if !(d > 0.0) || !d.is_finite() {
            return false;
        }
        let gkk = T::from_f64(d.sqrt());
        a[k * n + k] = gkk;
        for i in (k + 1)..n {
            let mut s = a[k * n + i];
            for j in 0..k {
                s = s - a[j * n + i] * a[j * n + k].conj();
            }
            a[k * n + i] = s / gkk;
        }
    }
    true
}

/// Solve `G * G^H * y = b` given the factor in the lower triangle of `a`
fn cholesky_solve<T: Scalar>(a: &[T], n: usize, b: &mut [T], m: usize) {
    for c in 0..m {
        // Forward: G w = b
        for i in 0..n {
            let mut s = b[c * n + i];
            for j in 0..i {
                s = s - a[j * n + i] * b[c * n + j];
            }
            b[c * n + i] = s / a[i * n + i];
        }
        // Backward: G^H y = w
        for i in (0..n).rev() {
            let mut s = b[c * n + i];
            for j in (i + 1)..n {
                s = s - a[i * n + j].conj() * b[c * n + j];
            }
            b[c * n + i] = s / a[i * n + i];
        }
    }
}

/// Factor `a = L * D * L^H` in place with unit lower-triangular L and a
/// real diagonal `d`, returning false when a pivot falls under `tol`
fn try_ldlh<T: Scalar>(a: &mut [T], n: usize, d: &mut Vec<f64>, tol: f64) -> bool {
    d.clear();
    for k in 0..n {
        let mut dk = a[k * n + k];
        for j in 0..k {
            let l = a[j * n + k];
            dk = dk - l * l.conj() * T::from_f64(d[j]);
        }
        let dk = dk.re();
        if dk.abs() <= tol || !dk.is_finite() {
            return false;
        }
        d.push(dk);
        for i in (k + 1)..n {
            let mut s = a[k * n + i];
            for j in 0..k {
                s = s - a[j * n + i] * a[j * n + k].conj() * T::from_f64(d[j]);
            }
            a[k * n + i] = s / T::from_f64(dk);
        }
    }
    true
}

/// Solve `L D L^H y = b` given the unit-lower factor and real diagonal
fn ldlh_solve<T: Scalar>(a: &[T], n: usize, d: &[f64], b: &mut [T], m: usize) {
    for c in 0..m {
        for i in 0..n {
            let mut s = b[c * n + i];
            for j in 0..i {
                s = s - a[j * n + i] * b[c * n + j];
            }
            b[c * n + i] = s;
        }
        for i in 0..n {
            b[c * n + i] = b[c * n + i] / T::from_f64(d[i]);
        }
        for i in (0..n).rev() {
            let mut s = b[c * n + i];
            for j in (i + 1)..n {
                s = s - a[i * n + j].conj() * b[c * n + j];
            }
            b[c * n + i] = s;
        }
    }
}

pub(super) fn solve_hermitian<T: Scalar>(left: &Matrix<T>, right: &Matrix<T>) -> Result<Matrix<T>> {
    let n = require_square(right)?;
    let tol = singular_tolerance(n, max_modulus(right));
    let (a0, b0, n, m) = transposed_system(left, right);

    let mut a = a0.clone();
    if try_cholesky(&mut a, n) {
        let mut b = b0;
        cholesky_solve(&a, n, &mut b, m);
        return assemble(&b, n, m);
    }

    let mut a = a0.clone();
    let mut d = Vec::with_capacity(n);
    if try_ldlh(&mut a, n, &mut d, tol) {
        let mut b = b0;
        ldlh_solve(&a, n, &d, &mut b, m);
        return assemble(&b, n, m);
    }

    // Indefinite with an unusable leading pivot; the pivoted general path
    // settles whether the operand is actually singular
    let mut a = a0;
    let mut b = b0;
    lu_solve_in_place(&mut a, n, &mut b, m, tol)?;
    assemble(&b, n, m)
}
