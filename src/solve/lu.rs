//! General square solve: LU factorization with partial pivoting
//!
//! The reference path every structure-specific branch must agree with.
//! Works on the transposed system; the factorization and both
//! substitution sweeps run over a dense column-major scratch copy.

use super::{assemble, max_modulus, require_square, singular_tolerance, transposed_system};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::Scalar;

/// Factor `a` (n x n, column-major) in place and solve `a * y = b` for
/// every column of `b` (n x m, column-major)
pub(super) fn lu_solve_in_place<T: Scalar>(
    a: &mut [T],
    n: usize,
    b: &mut [T],
    m: usize,
    tol: f64,
) -> Result<()> {
    for k in 0..n {
        // Partial pivoting on column k
        let mut p = k;
        let mut best = a[k * n + k].modulus();
        for i in (k + 1)..n {
            let cand = a[k * n + i].modulus();
            if cand > best {
                best = cand;
                p = i;
            }
        }
        if best <= tol {
            return Err(Error::singular(format!(
                "pivot {k} is zero to working precision"
            )));
        }
        if p != k {
            for j in 0..n {
                a.swap(j * n + k, j * n + p);
            }
            for c in 0..m {
                b.swap(c * n + k, c * n + p);
            }
        }

        let pivot = a[k * n + k];
        for i in (k + 1)..n {
            let f = a[k * n + i] / pivot;
            if f.is_zero() {
                continue;
            }
            a[k * n + i] = f;
            for j in (k + 1)..n {
                a[j * n + i] = a[j * n + i] - f * a[j * n + k];
            }
            for c in 0..m {
                b[c * n + i] = b[c * n + i] - f * b[c * n + k];
            }
        }
    }

    // Back substitution against U
    for c in 0..m {
        for i in (0..n).rev() {
            let mut s = b[c * n + i];
            for j in (i + 1)..n {
                s = s - a[j * n + i] * b[c * n + j];
            }
            b[c * n + i] = s / a[i * n + i];
        }
    }
    Ok(())
}

pub(super) fn solve_general<T: Scalar>(left: &Matrix<T>, right: &Matrix<T>) -> Result<Matrix<T>> {
    let n = require_square(right)?;
    let tol = singular_tolerance(n, max_modulus(right));
    let (mut a, mut b, n, m) = transposed_system(left, right);
    lu_solve_in_place(&mut a, n, &mut b, m, tol)?;
    assemble(&b, n, m)
}
