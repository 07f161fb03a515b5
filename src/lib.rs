//! # numat
//!
//! **Double-precision matrix engine with dense and compressed-row sparse
//! storage and pattern-driven linear solves.**
//!
//! numat keeps one logical [`Matrix`](matrix::Matrix) type over two scalar
//! domains (`f64` and [`Complex64`](scalar::Complex64)) and two physical
//! layouts (dense column-major, compressed-row sparse). Matrix division
//! inspects the structural pattern of the right operand and picks the
//! cheapest factorization that the pattern allows.
//!
//! ## Features
//!
//! - **Storage**: dense column-major or compressed-row sparse behind one
//!   closed enum, with exact round-trip conversion between the two
//! - **Pattern classifier**: diagonal, bidiagonal, tridiagonal, banded,
//!   Hessenberg, triangular, symmetric/skew, Hermitian/skew classifications
//!   plus bandwidths, computed on demand from current values
//! - **Operators**: elementwise arithmetic with 1x1 broadcast, matrix and
//!   scalar multiplication, transpose / conjugate / conjugate-transpose,
//!   for every real/complex operand pairing
//! - **Views**: read-only projections and row collections that borrow the
//!   owner's storage
//! - **Division**: `X * right = left` solved by scalar reciprocal, diagonal
//!   scaling, triangular substitution, Hessenberg elimination, Cholesky
//!   with symmetric-indefinite fallback, pivoted LU, or QR least squares,
//!   selected from the right operand's pattern
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use numat::prelude::*;
//!
//! let a = RealMatrix::from_row_major(2, 2, &[4.0, 0.0, 1.0, 3.0])?;
//! let b = RealMatrix::identity(2)?;
//!
//! let x = b.divide(&a)?; // X * A = I, via the lower-triangular branch
//! let check = x.matmul(&a)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod matrix;
pub mod ops;
pub mod pattern;
pub mod scalar;
pub mod solve;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{
        ComplexMatrix, IndexExpr, Matrix, RealMatrix, StorageOrder, StorageScheme,
    };
    pub use crate::pattern::StructuralPattern;
    pub use crate::scalar::{Complex64, Scalar};
    pub use crate::solve::{solve, SolveStrategy};
}
