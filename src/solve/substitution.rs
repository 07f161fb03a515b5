//! Column-by-column substitution against a triangular right operand
//!
//! Solved in the original orientation `X * R = L`: for lower-triangular
//! R, column j of L depends only on columns j.. of X, so the columns of X
//! resolve from last to first; for upper-triangular R they resolve from
//! first to last. O(n^2) per left-hand row, no scratch factorization.

use super::{max_modulus, require_square, singular_tolerance};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::Scalar;

pub(super) fn solve_triangular<T: Scalar>(
    left: &Matrix<T>,
    right: &Matrix<T>,
    lower: bool,
) -> Result<Matrix<T>> {
    let n = require_square(right)?;
    let m = left.nrows();
    let tol = singular_tolerance(n, max_modulus(right));
    let mut x = vec![T::zero(); m * n];

    let order: Box<dyn Iterator<Item = usize>> = if lower {
        Box::new((0..n).rev())
    } else {
        Box::new(0..n)
    };
    for j in order {
        let pivot = right.at(j, j);
        if pivot.modulus() <= tol {
            return Err(Error::singular(format!(
                "zero pivot on the diagonal at ({j}, {j})"
            )));
        }
        let range: std::ops::Range<usize> = if lower { (j + 1)..n } else { 0..j };
        for i in 0..m {
            let mut s = left.at(i, j);
            for k in range.clone() {
                let r = right.at(k, j);
                if !r.is_zero() {
                    s = s - x[k * m + i] * r;
                }
            }
            x[j * m + i] = s / pivot;
        }
    }

    Matrix::from_column_major(m, n, &x)
}
