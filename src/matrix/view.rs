//! Read-only and row-oriented views that alias a matrix's storage
//!
//! Views borrow the owner rather than copying storage, so a mutation made
//! through the owner between reads is visible through the view. The borrow
//! checker bounds every view's lifetime by its owner.

use super::core::Matrix;
use super::cursor::ElementCursor;
use super::index::IndexExpr;
use super::storage::StorageScheme;
use crate::error::{Error, Result};
use crate::pattern::StructuralPattern;
use crate::scalar::Scalar;

/// A read-only projection of a matrix
///
/// Exposes the non-mutating surface of [`Matrix`]; every mutating member
/// fails with a not-supported error instead of compiling it away, so code
/// generic over "matrix-like" handles gets a uniform runtime contract.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnlyView<'a, T: Scalar> {
    owner: &'a Matrix<T>,
}

impl<'a, T: Scalar> ReadOnlyView<'a, T> {
    pub(crate) fn new(owner: &'a Matrix<T>) -> Self {
        Self { owner }
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.owner.nrows()
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.owner.ncols()
    }

    /// Shape as [rows, cols]
    pub fn shape(&self) -> [usize; 2] {
        self.owner.shape()
    }

    /// Total logical element count
    pub fn count(&self) -> usize {
        self.owner.count()
    }

    /// Physical layout tag of the aliased storage
    pub fn scheme(&self) -> StorageScheme {
        self.owner.scheme()
    }

    /// Read the element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.owner.get(row, col)
    }

    /// Extract a sub-matrix (a new owned matrix; see [`Matrix::sub_matrix`])
    pub fn sub_matrix(
        &self,
        rows: impl Into<IndexExpr>,
        cols: impl Into<IndexExpr>,
    ) -> Result<Matrix<T>> {
        self.owner.sub_matrix(rows, cols)
    }

    /// Structural pattern of the current contents
    pub fn pattern(&self) -> StructuralPattern {
        self.owner.pattern()
    }

    /// The display name, if set
    pub fn name(&self) -> Option<&str> {
        self.owner.name()
    }

    /// The label of a row, if one was set
    pub fn try_get_row_name(&self, index: usize) -> Option<&str> {
        self.owner.try_get_row_name(index)
    }

    /// The label of a column, if one was set
    pub fn try_get_column_name(&self, index: usize) -> Option<&str> {
        self.owner.try_get_column_name(index)
    }

    /// A cursor over the elements in column-major order
    pub fn cursor(&self) -> ElementCursor<'a, T> {
        self.owner.cursor()
    }

    /// Owned copy of the viewed matrix
    pub fn to_matrix(&self) -> Matrix<T> {
        self.owner.clone()
    }

    /// Rejected: views do not permit element writes
    pub fn set(&self, _row: usize, _col: usize, _value: T) -> Result<()> {
        Err(Error::NotSupported { op: "set" })
    }

    /// Rejected: views do not permit sub-matrix writes
    pub fn set_sub_matrix(
        &self,
        _rows: impl Into<IndexExpr>,
        _cols: impl Into<IndexExpr>,
        _source: &Matrix<T>,
    ) -> Result<()> {
        Err(Error::NotSupported {
            op: "set_sub_matrix",
        })
    }

    /// Rejected: views do not permit renaming
    pub fn set_row_name(&self, _index: usize, _name: &str) -> Result<()> {
        Err(Error::NotSupported { op: "set_row_name" })
    }

    /// Rejected: views do not permit renaming
    pub fn set_column_name(&self, _index: usize, _name: &str) -> Result<()> {
        Err(Error::NotSupported {
            op: "set_column_name",
        })
    }

    /// Rejected: views do not permit label removal
    pub fn remove_row_name(&self, _index: usize) -> Result<bool> {
        Err(Error::NotSupported {
            op: "remove_row_name",
        })
    }

    /// Rejected: views do not permit label removal
    pub fn remove_column_name(&self, _index: usize) -> Result<bool> {
        Err(Error::NotSupported {
            op: "remove_column_name",
        })
    }
}

impl<T: Scalar> std::fmt::Display for ReadOnlyView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.owner.fmt(f)
    }
}

/// A row-major, read-oriented collection view over selected rows
#[derive(Debug, Clone)]
pub struct RowCollection<'a, T: Scalar> {
    owner: &'a Matrix<T>,
    rows: Vec<usize>,
}

impl<'a, T: Scalar> RowCollection<'a, T> {
    /// Number of selected rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the selection is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The source row index of the i-th selected row
    pub fn source_row(&self, i: usize) -> Option<usize> {
        self.rows.get(i).copied()
    }

    /// The i-th selected row as an owned vector
    pub fn row(&self, i: usize) -> Result<Vec<T>> {
        let &r = self
            .rows
            .get(i)
            .ok_or_else(|| Error::index_out_of_bounds("row_index", i, self.rows.len()))?;
        Ok((0..self.owner.ncols()).map(|c| self.owner.at(r, c)).collect())
    }

    /// Iterate the selected rows in order
    pub fn iter(&self) -> impl Iterator<Item = Vec<T>> + '_ {
        self.rows
            .iter()
            .map(move |&r| (0..self.owner.ncols()).map(|c| self.owner.at(r, c)).collect())
    }

    /// Materialize the selection as a full matrix, forwarding names
    ///
    /// # Errors
    ///
    /// An empty selection cannot form a matrix and fails with an
    /// out-of-range error.
    pub fn to_matrix(&self) -> Result<Matrix<T>> {
        self.owner
            .sub_matrix(IndexExpr::List(self.rows.clone()), IndexExpr::All)
    }
}

impl<T: Scalar> Matrix<T> {
    /// A read-only view aliasing this matrix's storage
    pub fn as_read_only(&self) -> ReadOnlyView<'_, T> {
        ReadOnlyView::new(self)
    }

    /// A row collection over the selected rows (wildcard selects all)
    pub fn as_row_collection(&self, rows: impl Into<IndexExpr>) -> Result<RowCollection<'_, T>> {
        let rows = rows.into().resolve(self.nrows(), "row_indexes")?;
        Ok(RowCollection { owner: self, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::RealMatrix;

    #[test]
    fn test_read_only_view_reads() {
        let m = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let v = m.as_read_only();
        assert_eq!(v.shape(), [2, 2]);
        assert_eq!(v.get(1, 0).unwrap(), 3.0);
        assert_eq!(v.to_matrix(), m);
    }

    #[test]
    fn test_read_only_view_rejects_mutation() {
        let m = RealMatrix::zeros(2, 2).unwrap();
        let v = m.as_read_only();
        assert!(matches!(
            v.set(0, 0, 1.0),
            Err(Error::NotSupported { op: "set" })
        ));
        assert!(matches!(
            v.set_row_name(0, "x"),
            Err(Error::NotSupported { .. })
        ));
        assert!(matches!(
            v.remove_column_name(0),
            Err(Error::NotSupported { .. })
        ));
    }

    #[test]
    fn test_view_sees_owner_mutation() {
        let mut m = RealMatrix::zeros(2, 2).unwrap();
        m.set(0, 0, 1.0).unwrap();
        {
            let v = m.as_read_only();
            assert_eq!(v.get(0, 0).unwrap(), 1.0);
        }
        m.set(0, 0, 2.0).unwrap();
        let v = m.as_read_only();
        assert_eq!(v.get(0, 0).unwrap(), 2.0);
    }

    #[test]
    fn test_row_collection() {
        let m = RealMatrix::from_row_major(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let rc = m.as_row_collection([2usize, 0]).unwrap();
        assert_eq!(rc.len(), 2);
        assert_eq!(rc.row(0).unwrap(), vec![5.0, 6.0]);
        assert_eq!(rc.row(1).unwrap(), vec![1.0, 2.0]);

        let back = rc.to_matrix().unwrap();
        assert_eq!(back.shape(), [2, 2]);
        assert_eq!(back.get(0, 1).unwrap(), 6.0);
    }

    #[test]
    fn test_row_collection_default_all() {
        let m = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let rc = m.as_row_collection(..).unwrap();
        assert_eq!(rc.len(), 2);
        assert_eq!(rc.to_matrix().unwrap(), m);
    }

    #[test]
    fn test_empty_row_collection() {
        let m = RealMatrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let rc = m.as_row_collection(Vec::<usize>::new()).unwrap();
        assert!(rc.is_empty());
        assert_eq!(rc.iter().count(), 0);
        assert!(matches!(
            rc.to_matrix(),
            Err(Error::OutOfRange {
                param: "row_indexes",
                ..
            })
        ));
    }
}
