//! Row/column index expressions and sub-matrix access

use std::ops::{Range, RangeFull, RangeInclusive};

use super::core::Matrix;
use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// A row or column index expression
///
/// Either an explicit ordered index sequence, a single index, or the
/// wildcard meaning "all indices in natural order". Explicit sequences are
/// used exactly as given: order and duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexExpr {
    /// Every index of the dimension, in natural order
    All,
    /// One concrete index
    Single(usize),
    /// An explicit ordered sequence (duplicates legal)
    List(Vec<usize>),
}

impl IndexExpr {
    /// Resolve to concrete indices against a dimension of `size`
    ///
    /// # Errors
    ///
    /// Any resolved index at or beyond `size` fails with an
    /// index-exceeds-dimensions error naming `param`.
    pub fn resolve(&self, size: usize, param: &'static str) -> Result<Vec<usize>> {
        match self {
            IndexExpr::All => Ok((0..size).collect()),
            IndexExpr::Single(i) => {
                if *i >= size {
                    return Err(Error::index_out_of_bounds(param, *i, size));
                }
                Ok(vec![*i])
            }
            IndexExpr::List(indexes) => {
                for &i in indexes {
                    if i >= size {
                        return Err(Error::index_out_of_bounds(param, i, size));
                    }
                }
                Ok(indexes.clone())
            }
        }
    }

    /// Whether this expression is the wildcard
    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, IndexExpr::All)
    }
}

impl From<usize> for IndexExpr {
    fn from(i: usize) -> Self {
        IndexExpr::Single(i)
    }
}

impl From<Vec<usize>> for IndexExpr {
    fn from(indexes: Vec<usize>) -> Self {
        IndexExpr::List(indexes)
    }
}

impl From<&[usize]> for IndexExpr {
    fn from(indexes: &[usize]) -> Self {
        IndexExpr::List(indexes.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for IndexExpr {
    fn from(indexes: [usize; N]) -> Self {
        IndexExpr::List(indexes.to_vec())
    }
}

impl From<RangeFull> for IndexExpr {
    fn from(_: RangeFull) -> Self {
        IndexExpr::All
    }
}

impl From<Range<usize>> for IndexExpr {
    fn from(range: Range<usize>) -> Self {
        IndexExpr::List(range.collect())
    }
}

impl From<RangeInclusive<usize>> for IndexExpr {
    fn from(range: RangeInclusive<usize>) -> Self {
        IndexExpr::List(range.collect())
    }
}

impl<T: Scalar> Matrix<T> {
    /// Extract a sub-matrix addressed by row and column expressions
    ///
    /// The result is a new dense matrix holding the selected cells in
    /// selection order; duplicate indices repeat values. Row and column
    /// labels of selected positions are forwarded to their new indices.
    pub fn sub_matrix(
        &self,
        rows: impl Into<IndexExpr>,
        cols: impl Into<IndexExpr>,
    ) -> Result<Matrix<T>> {
        let row_sel = rows.into().resolve(self.rows, "row_indexes")?;
        let col_sel = cols.into().resolve(self.cols, "column_indexes")?;
        if row_sel.is_empty() {
            return Err(Error::out_of_range("row_indexes", "selection is empty"));
        }
        if col_sel.is_empty() {
            return Err(Error::out_of_range("column_indexes", "selection is empty"));
        }

        let mut buf = vec![T::zero(); row_sel.len() * col_sel.len()];
        for (cp, &c) in col_sel.iter().enumerate() {
            for (rp, &r) in row_sel.iter().enumerate() {
                buf[cp * row_sel.len() + rp] = self.at(r, c);
            }
        }

        let mut out = Matrix::from_column_major(row_sel.len(), col_sel.len(), &buf)?;
        for (rp, &r) in row_sel.iter().enumerate() {
            if let Some(label) = self.row_names.get(&r) {
                out.row_names.insert(rp, label.clone());
            }
        }
        for (cp, &c) in col_sel.iter().enumerate() {
            if let Some(label) = self.col_names.get(&c) {
                out.col_names.insert(cp, label.clone());
            }
        }
        Ok(out)
    }

    /// Write a sub-matrix into the positions addressed by row and column
    /// expressions
    ///
    /// `source` must have exactly the resolved selection shape. Writes are
    /// applied in selection order, so the last write wins for duplicated
    /// targets.
    pub fn set_sub_matrix(
        &mut self,
        rows: impl Into<IndexExpr>,
        cols: impl Into<IndexExpr>,
        source: &Matrix<T>,
    ) -> Result<()> {
        let row_sel = rows.into().resolve(self.rows, "row_indexes")?;
        let col_sel = cols.into().resolve(self.cols, "column_indexes")?;

        if source.nrows() != row_sel.len() || source.ncols() != col_sel.len() {
            return Err(Error::dimension_mismatch(
                &[row_sel.len(), col_sel.len()],
                &[source.nrows(), source.ncols()],
            ));
        }

        for (rp, &r) in row_sel.iter().enumerate() {
            for (cp, &c) in col_sel.iter().enumerate() {
                self.set(r, c, source.at(rp, cp))?;
            }
        }
        Ok(())
    }
}
