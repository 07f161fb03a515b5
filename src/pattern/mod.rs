//! Structural pattern classification
//!
//! A pure read-only analysis over either storage form. Every applicable
//! fact is reported; a diagonal matrix is also triangular, banded,
//! symmetric, and Hessenberg, and the solve engine applies its own
//! priority order over these facts. Nothing here is cached: patterns are
//! recomputed from current values on every call, so they stay correct
//! across mutations.
//!
//! Equality checks are exact on stored values. The Hermitian facts use
//! conjugation and therefore coincide with the symmetric facts for real
//! matrices.

use crate::matrix::{Matrix, Storage};
use crate::scalar::Scalar;

/// The structural facts of a matrix, derived on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralPattern {
    /// rows == columns
    pub square: bool,
    /// Exactly one row or one column
    pub vector: bool,
    /// Exactly one row
    pub row_vector: bool,
    /// Exactly one column
    pub column_vector: bool,
    /// Exactly 1x1
    pub scalar: bool,
    /// Square with all off-diagonal elements zero
    pub diagonal: bool,
    /// Square with nonzeros confined to the diagonal and first superdiagonal
    pub upper_bidiagonal: bool,
    /// Square with nonzeros confined to the diagonal and first subdiagonal
    pub lower_bidiagonal: bool,
    /// Square with bandwidths at most one on both sides
    pub tridiagonal: bool,
    /// Square with no nonzero below the diagonal
    pub upper_triangular: bool,
    /// Square with no nonzero above the diagonal
    pub lower_triangular: bool,
    /// Square with at most one nonzero subdiagonal
    pub upper_hessenberg: bool,
    /// Square with at most one nonzero superdiagonal
    pub lower_hessenberg: bool,
    /// A[i,j] == A[j,i] for every element
    pub symmetric: bool,
    /// A[i,j] == -A[j,i] for every element
    pub skew_symmetric: bool,
    /// A[i,j] == conj(A[j,i]) for every element
    pub hermitian: bool,
    /// A[i,j] == -conj(A[j,i]) for every element
    pub skew_hermitian: bool,
    /// Largest d such that some A[i, i - d] is nonzero
    pub lower_bandwidth: usize,
    /// Largest d such that some A[i, i + d] is nonzero
    pub upper_bandwidth: usize,
}

fn bandwidths<T: Scalar>(m: &Matrix<T>) -> (usize, usize) {
    let mut lower = 0usize;
    let mut upper = 0usize;
    match &m.storage {
        Storage::Dense(data) => {
            let rows = m.nrows();
            for c in 0..m.ncols() {
                for r in 0..rows {
                    if !data[c * rows + r].is_zero() {
                        if r > c {
                            lower = lower.max(r - c);
                        } else {
                            upper = upper.max(c - r);
                        }
                    }
                }
            }
        }
        Storage::Sparse(csr) => {
            for (r, c, v) in csr.entries() {
                if !v.is_zero() {
                    if r > c {
                        lower = lower.max(r - c);
                    } else {
                        upper = upper.max(c - r);
                    }
                }
            }
        }
    }
    (lower, upper)
}

/// Symmetry-family checks in one pass over the stored entries
///
/// Returns (symmetric, skew_symmetric, hermitian, skew_hermitian). For
/// sparse storage only stored entries are visited; an entry missing on
/// both sides of the diagonal is a zero pair and satisfies all four
/// relations.
fn symmetry_facts<T: Scalar>(m: &Matrix<T>) -> (bool, bool, bool, bool) {
    let mut symmetric = true;
    let mut skew = true;
    let mut hermitian = true;
    let mut skew_hermitian = true;

    let mut visit = |v: T, mirror: T| {
        if v != mirror {
            symmetric = false;
        }
        if v != -mirror {
            skew = false;
        }
        if v != mirror.conj() {
            hermitian = false;
        }
        if v != -(mirror.conj()) {
            skew_hermitian = false;
        }
    };

    match &m.storage {
        Storage::Dense(data) => {
            let n = m.nrows();
            for c in 0..n {
                for r in 0..n {
                    visit(data[c * n + r], data[r * n + c]);
                }
            }
        }
        Storage::Sparse(csr) => {
            for (r, c, v) in csr.entries() {
                visit(v, csr.get(c, r));
            }
        }
    }
    (symmetric, skew, hermitian, skew_hermitian)
}

impl<T: Scalar> Matrix<T> {
    /// Derive the full structural pattern of the current contents
    pub fn pattern(&self) -> StructuralPattern {
        let rows = self.nrows();
        let cols = self.ncols();
        let square = rows == cols;
        let (lower_bandwidth, upper_bandwidth) = bandwidths(self);
        let (symmetric, skew_symmetric, hermitian, skew_hermitian) = if square {
            symmetry_facts(self)
        } else {
            (false, false, false, false)
        };

        StructuralPattern {
            square,
            vector: rows == 1 || cols == 1,
            row_vector: rows == 1,
            column_vector: cols == 1,
            scalar: rows == 1 && cols == 1,
            diagonal: square && lower_bandwidth == 0 && upper_bandwidth == 0,
            upper_bidiagonal: square && lower_bandwidth == 0 && upper_bandwidth <= 1,
            lower_bidiagonal: square && upper_bandwidth == 0 && lower_bandwidth <= 1,
            tridiagonal: square && lower_bandwidth <= 1 && upper_bandwidth <= 1,
            upper_triangular: square && lower_bandwidth == 0,
            lower_triangular: square && upper_bandwidth == 0,
            upper_hessenberg: square && lower_bandwidth <= 1,
            lower_hessenberg: square && upper_bandwidth <= 1,
            symmetric,
            skew_symmetric,
            hermitian,
            skew_hermitian,
            lower_bandwidth,
            upper_bandwidth,
        }
    }

    /// rows == columns
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// Exactly one row or one column
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.nrows() == 1 || self.ncols() == 1
    }

    /// Exactly one row
    #[inline]
    pub fn is_row_vector(&self) -> bool {
        self.nrows() == 1
    }

    /// Exactly one column
    #[inline]
    pub fn is_column_vector(&self) -> bool {
        self.ncols() == 1
    }

    /// Exactly 1x1
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.nrows() == 1 && self.ncols() == 1
    }

    /// Square with all off-diagonal elements zero
    pub fn is_diagonal(&self) -> bool {
        self.pattern().diagonal
    }

    /// Square with no nonzero below the diagonal
    pub fn is_upper_triangular(&self) -> bool {
        self.pattern().upper_triangular
    }

    /// Square with no nonzero above the diagonal
    pub fn is_lower_triangular(&self) -> bool {
        self.pattern().lower_triangular
    }

    /// Square with at most one nonzero subdiagonal
    pub fn is_upper_hessenberg(&self) -> bool {
        self.pattern().upper_hessenberg
    }

    /// Square with at most one nonzero superdiagonal
    pub fn is_lower_hessenberg(&self) -> bool {
        self.pattern().lower_hessenberg
    }

    /// A[i,j] == A[j,i] for every element
    pub fn is_symmetric(&self) -> bool {
        self.is_square() && symmetry_facts(self).0
    }

    /// A[i,j] == -A[j,i] for every element
    pub fn is_skew_symmetric(&self) -> bool {
        self.is_square() && symmetry_facts(self).1
    }

    /// A[i,j] == conj(A[j,i]) for every element
    pub fn is_hermitian(&self) -> bool {
        self.is_square() && symmetry_facts(self).2
    }

    /// A[i,j] == -conj(A[j,i]) for every element
    pub fn is_skew_hermitian(&self) -> bool {
        self.is_square() && symmetry_facts(self).3
    }

    /// Largest d such that some A[i, i - d] is nonzero
    pub fn lower_bandwidth(&self) -> usize {
        bandwidths(self).0
    }

    /// Largest d such that some A[i, i + d] is nonzero
    pub fn upper_bandwidth(&self) -> usize {
        bandwidths(self).1
    }
}
