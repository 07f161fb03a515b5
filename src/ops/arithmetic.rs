//! Elementwise binary and unary arithmetic with 1x1 scalar broadcast
//!
//! Binary operands must share dimensions exactly, except that a 1x1 matrix
//! broadcasts against any shape. Results favor dense storage when either
//! operand is dense; sparse pairs stay sparse, merged row by row. A
//! broadcast add or subtract over a sparse operand densifies (every
//! element changes), while a broadcast multiply preserves the scheme.

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{Error, Result};
use crate::matrix::{CsrData, Matrix, Storage};
use crate::scalar::{Complex64, Scalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Merge {
    /// Entries present on either side contribute (add, subtract)
    Union,
    /// Only entries present on both sides contribute (multiply)
    Intersection,
}

fn merge_sparse<T: Scalar>(
    a: &CsrData<T>,
    b: &CsrData<T>,
    f: impl Fn(T, T) -> T,
    merge: Merge,
) -> CsrData<T> {
    let mut values = Vec::new();
    let mut columns = Vec::new();
    let mut row_index = Vec::with_capacity(a.nrows() + 1);
    row_index.push(0);

    let mut push = |values: &mut Vec<T>, columns: &mut Vec<usize>, c: usize, v: T| {
        if !v.is_zero() {
            values.push(v);
            columns.push(c);
        }
    };

    for r in 0..a.nrows() {
        let ra = a.row_range(r);
        let rb = b.row_range(r);
        let (mut i, mut j) = (ra.start, rb.start);
        while i < ra.end && j < rb.end {
            let ca = a.columns()[i];
            let cb = b.columns()[j];
            if ca == cb {
                push(&mut values, &mut columns, ca, f(a.values()[i], b.values()[j]));
                i += 1;
                j += 1;
            } else if ca < cb {
                if merge == Merge::Union {
                    push(&mut values, &mut columns, ca, f(a.values()[i], T::zero()));
                }
                i += 1;
            } else {
                if merge == Merge::Union {
                    push(&mut values, &mut columns, cb, f(T::zero(), b.values()[j]));
                }
                j += 1;
            }
        }
        if merge == Merge::Union {
            while i < ra.end {
                push(&mut values, &mut columns, a.columns()[i], f(a.values()[i], T::zero()));
                i += 1;
            }
            while j < rb.end {
                push(&mut values, &mut columns, b.columns()[j], f(T::zero(), b.values()[j]));
                j += 1;
            }
        }
        row_index.push(values.len());
    }

    CsrData::from_parts(a.nrows(), a.ncols(), values, columns, row_index)
        .expect("row-ordered merge produces a consistent CSR structure")
}

fn elementwise<T: Scalar>(
    lhs: &Matrix<T>,
    rhs: &Matrix<T>,
    f: impl Fn(T, T) -> T + Copy,
    merge: Merge,
) -> Result<Matrix<T>> {
    if lhs.shape() == rhs.shape() {
        let mut out = match (&lhs.storage, &rhs.storage) {
            (Storage::Sparse(a), Storage::Sparse(b)) => Matrix {
                rows: lhs.rows,
                cols: lhs.cols,
                storage: Storage::Sparse(merge_sparse(a, b, f, merge)),
                name: None,
                row_names: Default::default(),
                col_names: Default::default(),
            },
            _ => {
                let (m, n) = (lhs.rows, lhs.cols);
                let mut buf = vec![T::zero(); m * n];
                for c in 0..n {
                    for r in 0..m {
                        buf[c * m + r] = f(lhs.at(r, c), rhs.at(r, c));
                    }
                }
                Matrix::from_column_major(m, n, &buf)?
            }
        };
        out.copy_names_from(lhs);
        Ok(out)
    } else if lhs.is_scalar() {
        let s = lhs.at(0, 0);
        Ok(broadcast(rhs, |v| f(s, v), merge))
    } else if rhs.is_scalar() {
        let s = rhs.at(0, 0);
        Ok(broadcast(lhs, |v| f(v, s), merge))
    } else {
        Err(Error::dimension_mismatch(&lhs.shape(), &rhs.shape()))
    }
}

/// Broadcast one value over every element of `m`
///
/// An intersection-style operator maps zero to zero, so sparse storage can
/// keep its structure; a union-style operator touches absent elements and
/// therefore densifies first.
fn broadcast<T: Scalar>(m: &Matrix<T>, f: impl Fn(T) -> T, merge: Merge) -> Matrix<T> {
    match merge {
        Merge::Intersection => m.map_stored(f),
        Merge::Union => m.to_dense().map_stored(f),
    }
}

impl<T: Scalar> Matrix<T> {
    /// Apply `f` to every stored element, leaving the structure unchanged
    pub(crate) fn map_stored_in_place(&mut self, f: impl Fn(T) -> T) {
        match &mut self.storage {
            Storage::Dense(data) => {
                for v in data.iter_mut() {
                    *v = f(*v);
                }
            }
            Storage::Sparse(csr) => {
                for v in csr.values_mut().iter_mut() {
                    *v = f(*v);
                }
            }
        }
    }

    /// Copy of this matrix with `f` applied to every stored element
    pub(crate) fn map_stored(&self, f: impl Fn(T) -> T) -> Matrix<T> {
        let mut out = self.clone();
        out.map_stored_in_place(f);
        out
    }

    /// Elementwise sum
    ///
    /// # Errors
    ///
    /// Fails with a dimension mismatch unless the shapes are equal or one
    /// operand is 1x1.
    pub fn add(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        elementwise(self, rhs, |a, b| a + b, Merge::Union)
    }

    /// Elementwise difference
    pub fn sub(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        elementwise(self, rhs, |a, b| a - b, Merge::Union)
    }

    /// Elementwise (Hadamard) product
    pub fn mul_elementwise(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        elementwise(self, rhs, |a, b| a * b, Merge::Intersection)
    }

    /// Elementwise negation
    pub fn negate(&self) -> Matrix<T> {
        self.map_stored(|v| -v)
    }

    /// Negate every element in place
    pub fn negate_mut(&mut self) {
        self.map_stored_in_place(|v| -v);
    }

    /// Multiply every element by `factor`, preserving the storage scheme
    pub fn scale(&self, factor: T) -> Matrix<T> {
        self.map_stored(|v| v * factor)
    }

    /// Multiply every element by `factor` in place
    pub fn scale_mut(&mut self, factor: T) {
        self.map_stored_in_place(|v| v * factor);
    }

    /// Divide every element by `divisor`
    ///
    /// # Errors
    ///
    /// Fails with a singularity error when the divisor is exactly zero.
    pub fn divide_scalar(&self, divisor: T) -> Result<Matrix<T>> {
        if divisor.is_zero() {
            return Err(Error::singular("scalar divisor is zero"));
        }
        Ok(self.map_stored(|v| v / divisor))
    }
}

impl<'a, 'b, T: Scalar> Add<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: &'b Matrix<T>) -> Matrix<T> {
        Matrix::add(self, rhs).expect("matrix addition requires matching dimensions")
    }
}

impl<'a, 'b, T: Scalar> Sub<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &'b Matrix<T>) -> Matrix<T> {
        Matrix::sub(self, rhs).expect("matrix subtraction requires matching dimensions")
    }
}

impl<'a, T: Scalar> Neg for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.negate()
    }
}

impl<'a, 'b> Add<&'b Matrix<Complex64>> for &'a Matrix<f64> {
    type Output = Matrix<Complex64>;

    fn add(self, rhs: &'b Matrix<Complex64>) -> Matrix<Complex64> {
        &self.to_complex() + rhs
    }
}

impl<'a, 'b> Add<&'b Matrix<f64>> for &'a Matrix<Complex64> {
    type Output = Matrix<Complex64>;

    fn add(self, rhs: &'b Matrix<f64>) -> Matrix<Complex64> {
        self + &rhs.to_complex()
    }
}

impl<'a, 'b> Sub<&'b Matrix<Complex64>> for &'a Matrix<f64> {
    type Output = Matrix<Complex64>;

    fn sub(self, rhs: &'b Matrix<Complex64>) -> Matrix<Complex64> {
        &self.to_complex() - rhs
    }
}

impl<'a, 'b> Sub<&'b Matrix<f64>> for &'a Matrix<Complex64> {
    type Output = Matrix<Complex64>;

    fn sub(self, rhs: &'b Matrix<f64>) -> Matrix<Complex64> {
        self - &rhs.to_complex()
    }
}

impl<'a> Mul<f64> for &'a Matrix<f64> {
    type Output = Matrix<f64>;

    fn mul(self, factor: f64) -> Matrix<f64> {
        self.scale(factor)
    }
}

impl<'a> Mul<Complex64> for &'a Matrix<Complex64> {
    type Output = Matrix<Complex64>;

    fn mul(self, factor: Complex64) -> Matrix<Complex64> {
        self.scale(factor)
    }
}

impl<'a> Mul<f64> for &'a Matrix<Complex64> {
    type Output = Matrix<Complex64>;

    fn mul(self, factor: f64) -> Matrix<Complex64> {
        self.scale(Complex64::new(factor, 0.0))
    }
}

impl<'a> Div<f64> for &'a Matrix<f64> {
    type Output = Matrix<f64>;

    fn div(self, divisor: f64) -> Matrix<f64> {
        self.divide_scalar(divisor)
            .expect("scalar division requires a nonzero divisor")
    }
}

impl<'a> Div<Complex64> for &'a Matrix<Complex64> {
    type Output = Matrix<Complex64>;

    fn div(self, divisor: Complex64) -> Matrix<Complex64> {
        self.divide_scalar(divisor)
            .expect("scalar division requires a nonzero divisor")
    }
}
