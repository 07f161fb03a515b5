//! Transpose, conjugate, and conjugate-transpose
//!
//! Transposition exchanges the row and column name maps along with the
//! storage: rows of the input become columns of the output. Dense storage
//! is reindexed in one pass; sparse storage is rebuilt by the CSR
//! count-prefix-scatter rebuild.

use crate::matrix::{Matrix, Storage};
use crate::scalar::Scalar;

impl<T: Scalar> Matrix<T> {
    /// Transposed copy, with row and column names exchanged
    pub fn transpose(&self) -> Matrix<T> {
        let mut out = self.clone();
        out.transpose_mut();
        out
    }

    /// Transpose the receiver, exchanging its row and column names
    pub fn transpose_mut(&mut self) {
        let (m, n) = (self.rows, self.cols);
        match &mut self.storage {
            Storage::Dense(data) => {
                let mut buf = vec![T::zero(); m * n];
                for c in 0..n {
                    for r in 0..m {
                        // out is n x m; out[c, r] = self[r, c]
                        buf[r * n + c] = data[c * m + r];
                    }
                }
                *data = buf;
            }
            Storage::Sparse(csr) => *csr = csr.transposed(),
        }
        self.rows = n;
        self.cols = m;
        std::mem::swap(&mut self.row_names, &mut self.col_names);
    }

    /// Elementwise complex conjugate (a copy for real matrices)
    pub fn conjugate(&self) -> Matrix<T> {
        self.map_stored(T::conj)
    }

    /// Conjugate every element in place
    pub fn conjugate_mut(&mut self) {
        self.map_stored_in_place(T::conj);
    }

    /// Conjugate transpose (Hermitian adjoint)
    pub fn conjugate_transpose(&self) -> Matrix<T> {
        let mut out = self.transpose();
        out.conjugate_mut();
        out
    }

    /// Conjugate-transpose the receiver in place
    pub fn conjugate_transpose_mut(&mut self) {
        self.transpose_mut();
        self.conjugate_mut();
    }
}

#[cfg(test)]
mod tests {
    use crate::matrix::{ComplexMatrix, RealMatrix, StorageScheme};
    use crate::scalar::Complex64;

    #[test]
    fn test_dense_transpose() {
        let a = RealMatrix::from_row_major(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = a.transpose();
        assert_eq!(t.shape(), [3, 2]);
        assert_eq!(t.get(2, 0).unwrap(), 3.0);
        assert_eq!(t.get(1, 1).unwrap(), 5.0);
    }

    #[test]
    fn test_double_transpose_is_identity() {
        let a = RealMatrix::from_row_major(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(a.transpose().transpose(), a);

        let s = a.to_sparse();
        assert_eq!(s.transpose().transpose(), s);
    }

    #[test]
    fn test_sparse_transpose_keeps_scheme() {
        let mut s = RealMatrix::sparse(2, 3, 2).unwrap();
        s.set(0, 2, 7.0).unwrap();
        s.set(1, 0, 8.0).unwrap();
        let t = s.transpose();
        assert_eq!(t.scheme(), StorageScheme::CompressedRows);
        assert_eq!(t.shape(), [3, 2]);
        assert_eq!(t.get(2, 0).unwrap(), 7.0);
        assert_eq!(t.get(0, 1).unwrap(), 8.0);
    }

    #[test]
    fn test_transpose_swaps_names() {
        let mut a = RealMatrix::zeros(2, 3).unwrap();
        a.set_row_name(1, "obs").unwrap();
        a.set_column_name(2, "price").unwrap();
        let t = a.transpose();
        assert_eq!(t.try_get_column_name(1), Some("obs"));
        assert_eq!(t.try_get_row_name(2), Some("price"));
        assert_eq!(t.try_get_row_name(1), None);
    }

    #[test]
    fn test_conjugate() {
        let z = ComplexMatrix::from_row_major(
            1,
            2,
            &[Complex64::new(1.0, 2.0), Complex64::new(0.0, -3.0)],
        )
        .unwrap();
        let c = z.conjugate();
        assert_eq!(c.get(0, 0).unwrap(), Complex64::new(1.0, -2.0));
        assert_eq!(c.get(0, 1).unwrap(), Complex64::new(0.0, 3.0));

        // Real conjugate is the identity transform
        let r = RealMatrix::from_row_major(1, 2, &[1.0, -2.0]).unwrap();
        assert_eq!(r.conjugate(), r);
    }

    #[test]
    fn test_in_place_variants() {
        let a = RealMatrix::from_row_major(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let mut b = a.clone();
        b.transpose_mut();
        assert_eq!(b, a.transpose());

        let z = ComplexMatrix::scalar(Complex64::new(0.0, 2.0));
        let mut w = z.clone();
        w.conjugate_transpose_mut();
        assert_eq!(w, z.conjugate_transpose());
    }

    #[test]
    fn test_conjugate_transpose() {
        let z = ComplexMatrix::from_row_major(
            2,
            1,
            &[Complex64::new(1.0, 1.0), Complex64::new(2.0, -2.0)],
        )
        .unwrap();
        let h = z.conjugate_transpose();
        assert_eq!(h.shape(), [1, 2]);
        assert_eq!(h.get(0, 0).unwrap(), Complex64::new(1.0, -1.0));
        assert_eq!(h.get(0, 1).unwrap(), Complex64::new(2.0, 2.0));
    }
}
