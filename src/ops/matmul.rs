//! Matrix product over both storage schemes
//!
//! Four kernels, one per operand scheme pairing. Only the sparse-sparse
//! pairing produces a sparse result; every other pairing materializes a
//! dense column-major buffer. The sparse-sparse kernel accumulates one
//! output row at a time into a dense scratch row, marking touched columns,
//! then emits them in sorted order.

use std::ops::Mul;

use crate::error::{Error, Result};
use crate::matrix::{CsrData, Matrix, Storage};
use crate::scalar::{Complex64, Scalar};

fn spgemm<T: Scalar>(a: &CsrData<T>, b: &CsrData<T>) -> CsrData<T> {
    let m = a.nrows();
    let n = b.ncols();
    let mut values = Vec::new();
    let mut columns = Vec::new();
    let mut row_index = Vec::with_capacity(m + 1);
    row_index.push(0);

    let mut acc = vec![T::zero(); n];
    let mut touched_at = vec![usize::MAX; n];
    let mut touched = Vec::new();

    for r in 0..m {
        touched.clear();
        for pos_a in a.row_range(r) {
            let l = a.columns()[pos_a];
            let av = a.values()[pos_a];
            for pos_b in b.row_range(l) {
                let j = b.columns()[pos_b];
                if touched_at[j] != r {
                    touched_at[j] = r;
                    acc[j] = T::zero();
                    touched.push(j);
                }
                acc[j] = acc[j] + av * b.values()[pos_b];
            }
        }
        touched.sort_unstable();
        for &j in &touched {
            if !acc[j].is_zero() {
                values.push(acc[j]);
                columns.push(j);
            }
        }
        row_index.push(values.len());
    }

    CsrData::from_parts(m, n, values, columns, row_index)
        .expect("row-wise accumulation produces a consistent CSR structure")
}

impl<T: Scalar> Matrix<T> {
    /// Matrix product `self * rhs`
    ///
    /// Row names come from the left operand, column names from the right.
    ///
    /// # Errors
    ///
    /// Fails with a dimension mismatch unless `self.ncols() == rhs.nrows()`.
    pub fn matmul(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.rows {
            return Err(Error::dimension_mismatch(
                &[self.rows, self.cols],
                &[rhs.rows, rhs.cols],
            ));
        }
        let (m, k, n) = (self.rows, self.cols, rhs.cols);

        let storage = match (&self.storage, &rhs.storage) {
            (Storage::Sparse(a), Storage::Sparse(b)) => Storage::Sparse(spgemm(a, b)),
            (Storage::Sparse(a), Storage::Dense(_)) => {
                let mut buf = vec![T::zero(); m * n];
                for (r, l, av) in a.entries() {
                    for j in 0..n {
                        buf[j * m + r] = buf[j * m + r] + av * rhs.at(l, j);
                    }
                }
                Storage::Dense(buf)
            }
            (Storage::Dense(da), Storage::Sparse(b)) => {
                let mut buf = vec![T::zero(); m * n];
                for (l, j, bv) in b.entries() {
                    for i in 0..m {
                        buf[j * m + i] = buf[j * m + i] + da[l * m + i] * bv;
                    }
                }
                Storage::Dense(buf)
            }
            (Storage::Dense(da), Storage::Dense(db)) => {
                let mut buf = vec![T::zero(); m * n];
                for j in 0..n {
                    for l in 0..k {
                        let bv = db[j * k + l];
                        if bv.is_zero() {
                            continue;
                        }
                        for i in 0..m {
                            buf[j * m + i] = buf[j * m + i] + da[l * m + i] * bv;
                        }
                    }
                }
                Storage::Dense(buf)
            }
        };

        Ok(Matrix {
            rows: m,
            cols: n,
            storage,
            name: None,
            row_names: self.row_names.clone(),
            col_names: rhs.col_names.clone(),
        })
    }
}

impl<'a, 'b, T: Scalar> Mul<&'b Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &'b Matrix<T>) -> Matrix<T> {
        self.matmul(rhs)
            .expect("matrix product requires inner dimensions to match")
    }
}

impl<'a, 'b> Mul<&'b Matrix<Complex64>> for &'a Matrix<f64> {
    type Output = Matrix<Complex64>;

    fn mul(self, rhs: &'b Matrix<Complex64>) -> Matrix<Complex64> {
        &self.to_complex() * rhs
    }
}

impl<'a, 'b> Mul<&'b Matrix<f64>> for &'a Matrix<Complex64> {
    type Output = Matrix<Complex64>;

    fn mul(self, rhs: &'b Matrix<f64>) -> Matrix<Complex64> {
        self * &rhs.to_complex()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::matrix::{ComplexMatrix, RealMatrix, StorageScheme};
    use crate::scalar::Complex64;

    #[test]
    fn test_dense_product() {
        // [[1, 2], [3, 4]] * [[5, 6], [7, 8]] = [[19, 22], [43, 50]]
        let a = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = RealMatrix::from_row_major(2, 2, &[5.0, 6.0, 7.0, 8.0]).unwrap();
        let p = &a * &b;
        assert_eq!(p.get(0, 0).unwrap(), 19.0);
        assert_eq!(p.get(0, 1).unwrap(), 22.0);
        assert_eq!(p.get(1, 0).unwrap(), 43.0);
        assert_eq!(p.get(1, 1).unwrap(), 50.0);
    }

    #[test]
    fn test_rectangular_product_shape() {
        let a = RealMatrix::filled(2, 3, 1.0).unwrap();
        let b = RealMatrix::filled(3, 4, 1.0).unwrap();
        let p = a.matmul(&b).unwrap();
        assert_eq!(p.shape(), [2, 4]);
        assert_eq!(p.get(1, 3).unwrap(), 3.0);
    }

    #[test]
    fn test_inner_dimension_mismatch() {
        let a = RealMatrix::zeros(2, 3).unwrap();
        let b = RealMatrix::zeros(2, 3).unwrap();
        assert!(matches!(a.matmul(&b), Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_identity_is_neutral() {
        let a = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let i = RealMatrix::identity(2).unwrap();
        assert_eq!(a.matmul(&i).unwrap(), a);
    }

    #[test]
    fn test_sparse_sparse_product() {
        let mut a = RealMatrix::sparse(2, 3, 3).unwrap();
        a.set(0, 0, 1.0).unwrap();
        a.set(0, 2, 2.0).unwrap();
        a.set(1, 1, 3.0).unwrap();
        let mut b = RealMatrix::sparse(3, 2, 3).unwrap();
        b.set(0, 1, 4.0).unwrap();
        b.set(1, 0, 5.0).unwrap();
        b.set(2, 1, 6.0).unwrap();

        let p = a.matmul(&b).unwrap();
        assert_eq!(p.scheme(), StorageScheme::CompressedRows);
        assert_eq!(p.get(0, 1).unwrap(), 16.0);
        assert_eq!(p.get(1, 0).unwrap(), 15.0);
        assert_eq!(p.get(0, 0).unwrap(), 0.0);

        // Matches the dense kernel
        assert_eq!(p.to_dense(), a.to_dense().matmul(&b.to_dense()).unwrap());
    }

    #[test]
    fn test_mixed_scheme_products_agree() {
        let a = RealMatrix::from_row_major(2, 3, &[1.0, 0.0, 2.0, 0.0, 3.0, 0.0]).unwrap();
        let b = RealMatrix::from_row_major(3, 2, &[1.0, 2.0, 0.0, 1.0, 4.0, 0.0]).unwrap();
        let reference = a.matmul(&b).unwrap();

        let sd = a.to_sparse().matmul(&b).unwrap();
        assert_eq!(sd.scheme(), StorageScheme::Dense);
        assert_eq!(sd, reference);

        let ds = a.matmul(&b.to_sparse()).unwrap();
        assert_eq!(ds.scheme(), StorageScheme::Dense);
        assert_eq!(ds, reference);
    }

    #[test]
    fn test_complex_product() {
        // [[i]] * [[i]] = [[-1]]
        let i = ComplexMatrix::scalar(Complex64::I);
        let p = &i * &i;
        assert_eq!(p.to_scalar().unwrap(), Complex64::new(-1.0, 0.0));
    }

    #[test]
    fn test_mixed_domain_product() {
        let a = RealMatrix::from_row_major(1, 2, &[1.0, 2.0]).unwrap();
        let z = ComplexMatrix::from_row_major(
            2,
            1,
            &[Complex64::new(0.0, 1.0), Complex64::new(1.0, 0.0)],
        )
        .unwrap();
        let p = &a * &z;
        assert_eq!(p.to_scalar().unwrap(), Complex64::new(2.0, 1.0));
    }

    #[test]
    fn test_product_name_forwarding() {
        let mut a = RealMatrix::identity(2).unwrap();
        a.set_row_name(0, "lhs-row").unwrap();
        let mut b = RealMatrix::identity(2).unwrap();
        b.set_column_name(1, "rhs-col").unwrap();
        let p = a.matmul(&b).unwrap();
        assert_eq!(p.try_get_row_name(0), Some("lhs-row"));
        assert_eq!(p.try_get_column_name(1), Some("rhs-col"));
    }
}
