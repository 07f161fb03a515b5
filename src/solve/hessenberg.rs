//! Hessenberg right operands: one off-band diagonal to eliminate
//!
//! On the transposed system an upper-Hessenberg right operand becomes a
//! lower-Hessenberg coefficient matrix, whose only entries above the
//! diagonal sit on the first superdiagonal. A bottom-up sweep of adjacent
//! row eliminations (with pairwise pivoting) reduces it to lower
//! triangular in O(n^2), after which forward substitution finishes the
//! job. The lower-Hessenberg case mirrors this: top-down subdiagonal
//! elimination, then back substitution.

use super::{assemble, max_modulus, require_square, singular_tolerance, transposed_system};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::Scalar;

fn swap_rows<T: Scalar>(a: &mut [T], n: usize, b: &mut [T], m: usize, r1: usize, r2: usize) {
    for j in 0..n {
        a.swap(j * n + r1, j * n + r2);
    }
    for c in 0..m {
        b.swap(c * n + r1, c * n + r2);
    }
}

/// Right operand is upper Hessenberg; `A = right^T` is lower Hessenberg
pub(super) fn solve_upper_hessenberg<T: Scalar>(
    left: &Matrix<T>,
    right: &Matrix<T>,
) -> Result<Matrix<T>> {
    let n = require_square(right)?;
    let tol = singular_tolerance(n, max_modulus(right));
    let (mut a, mut b, n, m) = transposed_system(left, right);

    // Eliminate the superdiagonal a[i, i+1] from the bottom up. Row i+1
    // is already reduced when row i is processed.
    for i in (0..n.saturating_sub(1)).rev() {
        if a[(i + 1) * n + (i + 1)].modulus() < a[(i + 1) * n + i].modulus() {
            swap_rows(&mut a, n, &mut b, m, i, i + 1);
        }
        let sup = a[(i + 1) * n + i];
        if sup.is_zero() {
            continue;
        }
        let pivot = a[(i + 1) * n + (i + 1)];
        if pivot.modulus() <= tol {
            return Err(Error::singular(format!(
                "pivot {} is zero to working precision",
                i + 1
            )));
        }
        let f = sup / pivot;
        for j in 0..=(i + 1) {
            a[j * n + i] = a[j * n + i] - f * a[j * n + (i + 1)];
        }
        for c in 0..m {
            b[c * n + i] = b[c * n + i] - f * b[c * n + (i + 1)];
        }
    }

    // Forward substitution against the lower triangle
    for c in 0..m {
        for i in 0..n {
            let mut s = b[c * n + i];
            for j in 0..i {
                s = s - a[j * n + i] * b[c * n + j];
            }
            let d = a[i * n + i];
            if d.modulus() <= tol {
                return Err(Error::singular(format!(
                    "pivot {i} is zero to working precision"
                )));
            }
            b[c * n + i] = s / d;
        }
    }
    assemble(&b, n, m)
}

/// Right operand is lower Hessenberg; `A = right^T` is upper Hessenberg
pub(super) fn solve_lower_hessenberg<T: Scalar>(
    left: &Matrix<T>,
    right: &Matrix<T>,
) -> Result<Matrix<T>> {
    let n = require_square(right)?;
    let tol = singular_tolerance(n, max_modulus(right));
    let (mut a, mut b, n, m) = transposed_system(left, right);

    // Eliminate the subdiagonal a[k+1, k] from the top down
    for k in 0..n.saturating_sub(1) {
        if a[k * n + k].modulus() < a[k * n + (k + 1)].modulus() {
            swap_rows(&mut a, n, &mut b, m, k, k + 1);
        }
        let sub = a[k * n + (k + 1)];
        if sub.is_zero() {
            continue;
        }
        let pivot = a[k * n + k];
        if pivot.modulus() <= tol {
            return Err(Error::singular(format!(
                "pivot {k} is zero to working precision"
            )));
        }
        let f = sub / pivot;
        for j in k..n {
            a[j * n + (k + 1)] = a[j * n + (k + 1)] - f * a[j * n + k];
        }
        for c in 0..m {
            b[c * n + (k + 1)] = b[c * n + (k + 1)] - f * b[c * n + k];
        }
    }

    // Back substitution against the upper triangle
    for c in 0..m {
        for i in (0..n).rev() {
            let mut s = b[c * n + i];
            for j in (i + 1)..n {
                s = s - a[j * n + i] * b[c * n + j];
            }
            let d = a[i * n + i];
            if d.modulus() <= tol {
                return Err(Error::singular(format!(
                    "pivot {i} is zero to working precision"
                )));
            }
            b[c * n + i] = s / d;
        }
    }
    assemble(&b, n, m)
}
