//! Pattern-driven solve engine: matrix division `X * right = left`
//!
//! [`solve`] classifies the right operand and dispatches to the cheapest
//! factorization its structure admits, in a fixed priority order. Every
//! branch produces the same answer as the general pivoted-LU path within
//! floating-point tolerance; structure buys speed, never a different
//! result.
//!
//! Most branches work on the transposed system: `X * R = L` becomes
//! `A * Y = B` with `A = R^T`, `B = L^T`, `X = Y^T`, so the kernels are
//! ordinary left-division solvers over dense column-major scratch buffers.
//! Triangular and diagonal right operands are solved in place in the
//! original orientation, column by column.
//!
//! The result is always dense. Its row names come from the left operand's
//! rows and its column names from the right operand's rows, matching the
//! shape algebra `(left.rows x right.rows) * right = left`.

mod hermitian;
mod hessenberg;
mod least_squares;
mod lu;
mod substitution;

use std::ops::Div;

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::scalar::{Complex64, Scalar};

/// The factorization family chosen for a division
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStrategy {
    /// Right operand is 1x1: scale by the reciprocal
    Scalar,
    /// Elementwise division by the diagonal entries
    Diagonal,
    /// Substitution against a lower-triangular right operand
    LowerTriangular,
    /// Substitution against an upper-triangular right operand
    UpperTriangular,
    /// Single-subdiagonal elimination for an upper-Hessenberg right operand
    UpperHessenberg,
    /// Single-superdiagonal elimination for a lower-Hessenberg right operand
    LowerHessenberg,
    /// Cholesky-class factorization for a symmetric/Hermitian right operand
    Hermitian,
    /// Pivoted LU for an unpatterned square right operand
    GeneralSquare,
    /// QR-based least squares for a rectangular right operand
    LeastSquares,
}

/// Choose the solve strategy for a right operand from its structure
///
/// Priority: scalar, then rectangular least squares, then diagonal,
/// triangular, Hessenberg, Hermitian, and finally general square.
pub fn select_strategy<T: Scalar>(right: &Matrix<T>) -> SolveStrategy {
    let p = right.pattern();
    if p.scalar {
        SolveStrategy::Scalar
    } else if !p.square {
        SolveStrategy::LeastSquares
    } else if p.diagonal {
        SolveStrategy::Diagonal
    } else if p.lower_triangular {
        SolveStrategy::LowerTriangular
    } else if p.upper_triangular {
        SolveStrategy::UpperTriangular
    } else if p.upper_hessenberg {
        SolveStrategy::UpperHessenberg
    } else if p.lower_hessenberg {
        SolveStrategy::LowerHessenberg
    } else if p.hermitian {
        SolveStrategy::Hermitian
    } else {
        SolveStrategy::GeneralSquare
    }
}

/// Solve `X * right = left` for X
///
/// The operands must agree on column count; the result has shape
/// `left.rows x right.rows`.
///
/// # Errors
///
/// Fails with a dimension mismatch on incompatible shapes, a singularity
/// error when a square right operand cannot be factored, and a
/// rank-deficiency error when a rectangular right operand lacks full rank.
pub fn solve<T: Scalar>(left: &Matrix<T>, right: &Matrix<T>) -> Result<Matrix<T>> {
    solve_with(left, right, select_strategy(right))
}

/// Solve with an explicitly chosen strategy
///
/// Used to cross-check the structure-specific branches against the
/// general path; [`solve`] is the normal entry point.
pub fn solve_with<T: Scalar>(
    left: &Matrix<T>,
    right: &Matrix<T>,
    strategy: SolveStrategy,
) -> Result<Matrix<T>> {
    if left.ncols() != right.ncols() {
        return Err(Error::dimension_mismatch(
            &[left.nrows(), right.ncols()],
            &[left.nrows(), left.ncols()],
        ));
    }

    let mut x = match strategy {
        SolveStrategy::Scalar => solve_scalar(left, right),
        SolveStrategy::Diagonal => solve_diagonal(left, right),
        SolveStrategy::LowerTriangular => {
            substitution::solve_triangular(left, right, true)
        }
        SolveStrategy::UpperTriangular => {
            substitution::solve_triangular(left, right, false)
        }
        SolveStrategy::UpperHessenberg => hessenberg::solve_upper_hessenberg(left, right),
        SolveStrategy::LowerHessenberg => hessenberg::solve_lower_hessenberg(left, right),
        SolveStrategy::Hermitian => hermitian::solve_hermitian(left, right),
        SolveStrategy::GeneralSquare => lu::solve_general(left, right),
        SolveStrategy::LeastSquares => least_squares::solve_least_squares(left, right),
    }?;

    x.name = None;
    x.row_names = left.row_names.clone();
    x.col_names = right.row_names.clone();
    Ok(x)
}

/// Pivot threshold scaled to the problem size and magnitude
pub(crate) fn singular_tolerance(n: usize, max_abs: f64) -> f64 {
    n as f64 * f64::EPSILON * max_abs
}

/// Largest element modulus of a matrix
pub(crate) fn max_modulus<T: Scalar>(m: &Matrix<T>) -> f64 {
    let mut max = 0.0f64;
    match m.csr() {
        Some(csr) => {
            for &v in csr.values() {
                max = max.max(v.modulus());
            }
        }
        None => {
            for c in 0..m.ncols() {
                for r in 0..m.nrows() {
                    max = max.max(m.at(r, c).modulus());
                }
            }
        }
    }
    max
}

fn require_square<T: Scalar>(right: &Matrix<T>) -> Result<usize> {
    if right.nrows() != right.ncols() {
        return Err(Error::dimension_mismatch(
            &[right.nrows(), right.nrows()],
            &[right.nrows(), right.ncols()],
        ));
    }
    Ok(right.nrows())
}

fn solve_scalar<T: Scalar>(left: &Matrix<T>, right: &Matrix<T>) -> Result<Matrix<T>> {
    if right.nrows() != 1 || right.ncols() != 1 {
        return Err(Error::dimension_mismatch(&[1, 1], &[right.nrows(), right.ncols()]));
    }
    let d = right.get(0, 0)?;
    if d.is_zero() {
        return Err(Error::singular("1x1 right operand is zero"));
    }
    let r = d.recip();
    Ok(left.to_dense().map_stored(|v| v * r))
}

fn solve_diagonal<T: Scalar>(left: &Matrix<T>, right: &Matrix<T>) -> Result<Matrix<T>> {
    let n = require_square(right)?;
    let m = left.nrows();
    // Same pivot threshold as the triangular branch, so overlapping
    // structures agree on what counts as singular
    let tol = singular_tolerance(n, max_modulus(right));
    let mut buf = vec![T::zero(); m * n];
    for j in 0..n {
        let d = right.at(j, j);
        if d.modulus() <= tol {
            return Err(Error::singular(format!("zero diagonal entry at ({j}, {j})")));
        }
        let r = d.recip();
        for i in 0..m {
            buf[j * m + i] = left.at(i, j) * r;
        }
    }
    Matrix::from_column_major(m, n, &buf)
}

/// Build the transposed system `A * Y = B` with `A = right^T`,
/// `B = left^T`, both dense column-major
pub(super) fn transposed_system<T: Scalar>(
    left: &Matrix<T>,
    right: &Matrix<T>,
) -> (Vec<T>, Vec<T>, usize, usize) {
    let n = right.ncols();
    let cols_a = right.nrows();
    let m = left.nrows();

    let mut a = vec![T::zero(); n * cols_a];
    for j in 0..cols_a {
        for i in 0..n {
            a[j * n + i] = right.at(j, i);
        }
    }
    let mut b = vec![T::zero(); n * m];
    for p in 0..m {
        for i in 0..n {
            b[p * n + i] = left.at(p, i);
        }
    }
    (a, b, n, m)
}

/// Transpose the solved `Y` (`rows_y x m`, column-major) back into
/// `X = Y^T`
pub(super) fn assemble<T: Scalar>(y: &[T], rows_y: usize, m: usize) -> Result<Matrix<T>> {
    let mut x = vec![T::zero(); m * rows_y];
    for p in 0..m {
        for i in 0..rows_y {
            x[i * m + p] = y[p * rows_y + i];
        }
    }
    Matrix::from_column_major(m, rows_y, &x)
}

impl<T: Scalar> Matrix<T> {
    /// Matrix division: solve `X * rhs = self` for X
    ///
    /// See [`solve`] for the strategy selection and error contract.
    pub fn divide(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        solve(self, rhs)
    }
}

impl<'a, 'b, T: Scalar> Div<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, rhs: &'b Matrix<T>) -> Matrix<T> {
        self.divide(rhs)
            .expect("matrix division requires compatible shapes and a full-rank divisor")
    }
}

impl<'a, 'b> Div<&'b Matrix<Complex64>> for &'a Matrix<f64> {
    type Output = Matrix<Complex64>;

    fn div(self, rhs: &'b Matrix<Complex64>) -> Matrix<Complex64> {
        &self.to_complex() / rhs
    }
}

impl<'a, 'b> Div<&'b Matrix<f64>> for &'a Matrix<Complex64> {
    type Output = Matrix<Complex64>;

    fn div(self, rhs: &'b Matrix<f64>) -> Matrix<Complex64> {
        self / &rhs.to_complex()
    }
}
