//! Error types for numat

use thiserror::Error;

/// Result type alias using numat's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in numat operations
#[derive(Error, Debug)]
pub enum Error {
    /// A dimension or capacity parameter has an invalid value
    #[error("Parameter '{param}' is out of range: {reason}")]
    OutOfRange {
        /// The offending parameter name
        param: &'static str,
        /// Why the value is rejected
        reason: String,
    },

    /// An index exceeds the dimension it addresses
    #[error("Index {index} exceeds dimension {size} for parameter '{param}'")]
    IndexOutOfBounds {
        /// The offending parameter name
        param: &'static str,
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Operand shapes are incompatible, or data length does not match
    /// the declared dimensions
    #[error("Dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Expected shape or length
        expected: Vec<usize>,
        /// Actual shape or length
        got: Vec<usize>,
    },

    /// A row/column label is empty, whitespace, or the reserved wildcard token
    #[error("Invalid name for parameter '{param}': {reason}")]
    InvalidName {
        /// The offending parameter name
        param: &'static str,
        /// Why the name is rejected
        reason: String,
    },

    /// Division's right operand cannot be factored (zero pivot or zero
    /// diagonal entry)
    #[error("Singular matrix: {reason}")]
    Singular {
        /// Which factorization step failed
        reason: String,
    },

    /// A rectangular right operand does not have full rank
    #[error("Rank-deficient matrix: {reason}")]
    RankDeficient {
        /// Which rank probe failed
        reason: String,
    },

    /// Element cursor read before the first advance or after exhaustion
    #[error("Cursor is positioned before the first or past the last element")]
    InvalidCursorState,

    /// Mutation attempted through a read-only view
    #[error("Operation '{op}' is not supported on a read-only matrix view")]
    NotSupported {
        /// The rejected operation
        op: &'static str,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an out-of-range error
    pub fn out_of_range(param: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            param,
            reason: reason.into(),
        }
    }

    /// Create an index-out-of-bounds error
    pub fn index_out_of_bounds(param: &'static str, index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { param, index, size }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::DimensionMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid-name error
    pub fn invalid_name(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            param,
            reason: reason.into(),
        }
    }

    /// Create a singularity error
    pub fn singular(reason: impl Into<String>) -> Self {
        Self::Singular {
            reason: reason.into(),
        }
    }

    /// Create a rank-deficiency error
    pub fn rank_deficient(reason: impl Into<String>) -> Self {
        Self::RankDeficient {
            reason: reason.into(),
        }
    }
}
