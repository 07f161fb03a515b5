//! Dual storage: dense column-major and compressed-row sparse

use crate::error::{Error, Result};
use crate::scalar::Scalar;

/// Physical layout tag of a matrix's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScheme {
    /// Flat column-major array holding every element
    Dense,
    /// Compressed-row sparse: nonzero values, column indices, row offsets
    CompressedRows,
}

impl StorageScheme {
    /// Returns the scheme name as a string
    pub fn name(&self) -> &'static str {
        match self {
            StorageScheme::Dense => "Dense",
            StorageScheme::CompressedRows => "CompressedRows",
        }
    }
}

impl std::fmt::Display for StorageScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Interpretation order for raw constructor data
///
/// Internal dense storage is always column-major; this only selects how a
/// caller-supplied flat array is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOrder {
    /// Consecutive elements walk down a column
    ColumnMajor,
    /// Consecutive elements walk along a row
    RowMajor,
}

/// Raw matrix contents for one scalar type
///
/// A closed tagged variant: every operator branches explicitly on the two
/// tags, so the compiler checks exhaustiveness whenever a new layout
/// concern appears.
#[derive(Debug, Clone, PartialEq)]
pub enum Storage<T: Scalar> {
    /// Column-major flat array of `rows * cols` elements
    Dense(Vec<T>),
    /// Compressed-row sparse structure
    Sparse(CsrData<T>),
}

impl<T: Scalar> Storage<T> {
    /// Returns the storage scheme tag
    #[inline]
    pub fn scheme(&self) -> StorageScheme {
        match self {
            Storage::Dense(_) => StorageScheme::Dense,
            Storage::Sparse(_) => StorageScheme::CompressedRows,
        }
    }
}

/// Compressed-row sparse matrix data
///
/// Entries of row `r` occupy `values[row_index[r]..row_index[r + 1]]` with
/// strictly increasing column indices. Elements absent from the structure
/// are logically zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrData<T: Scalar> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
    columns: Vec<usize>,
    row_index: Vec<usize>,
}

impl<T: Scalar> CsrData<T> {
    /// Create an empty CSR structure with reserved capacity for `capacity`
    /// nonzero entries
    pub fn with_capacity(rows: usize, cols: usize, capacity: usize) -> Self {
        Self {
            rows,
            cols,
            values: Vec::with_capacity(capacity),
            columns: Vec::with_capacity(capacity),
            row_index: vec![0; rows + 1],
        }
    }

    /// Create a CSR structure from its raw components
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `values` and `columns` have different lengths
    /// - `row_index` length is not `rows + 1`, does not start at 0, does
    ///   not end at the entry count, or is not monotonic
    /// - any column index is out of bounds or out of order within its row
    pub fn from_parts(
        rows: usize,
        cols: usize,
        values: Vec<T>,
        columns: Vec<usize>,
        row_index: Vec<usize>,
    ) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(Error::dimension_mismatch(&[values.len()], &[columns.len()]));
        }
        if row_index.len() != rows + 1 {
            return Err(Error::dimension_mismatch(&[rows + 1], &[row_index.len()]));
        }
        if row_index[0] != 0 {
            return Err(Error::out_of_range(
                "row_index",
                format!("first offset must be 0, got {}", row_index[0]),
            ));
        }
        if row_index[rows] != values.len() {
            return Err(Error::out_of_range(
                "row_index",
                format!(
                    "last offset must equal the entry count {}, got {}",
                    values.len(),
                    row_index[rows]
                ),
            ));
        }
        for r in 0..rows {
            let (start, end) = (row_index[r], row_index[r + 1]);
            if start > end {
                return Err(Error::out_of_range(
                    "row_index",
                    format!("offsets for row {} are not monotonic", r),
                ));
            }
            for pos in start..end {
                let c = columns[pos];
                if c >= cols {
                    return Err(Error::index_out_of_bounds("columns", c, cols));
                }
                if pos > start && columns[pos - 1] >= c {
                    return Err(Error::out_of_range(
                        "columns",
                        format!("column indices in row {} are not strictly increasing", r),
                    ));
                }
            }
        }

        Ok(Self {
            rows,
            cols,
            values,
            columns,
            row_index,
        })
    }

    /// Number of rows
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Reserved nonzero slots (always `>=` the used count)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Stored values in row order
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Mutable access to the stored values; the structure is unchanged
    #[inline]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Column index per stored value
    #[inline]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Row-start offsets, length `rows + 1`
    #[inline]
    pub fn row_index(&self) -> &[usize] {
        &self.row_index
    }

    /// Entry range of row `r` within `values`/`columns`
    #[inline]
    pub fn row_range(&self, r: usize) -> std::ops::Range<usize> {
        self.row_index[r]..self.row_index[r + 1]
    }

    /// Read the element at (r, c); absent entries are zero
    ///
    /// Binary search within the row's column-index slice.
    pub fn get(&self, r: usize, c: usize) -> T {
        let range = self.row_range(r);
        match self.columns[range.clone()].binary_search(&c) {
            Ok(offset) => self.values[range.start + offset],
            Err(_) => T::zero(),
        }
    }

    /// Write the element at (r, c)
    ///
    /// Updates an existing entry in place, or inserts a new one shifting
    /// subsequent entries (O(nnz) worst case). Writing zero to an absent
    /// position is a no-op; capacity doubles when an insert exceeds it.
    pub fn set(&mut self, r: usize, c: usize, value: T) {
        let range = self.row_range(r);
        match self.columns[range.clone()].binary_search(&c) {
            Ok(offset) => {
                self.values[range.start + offset] = value;
            }
            Err(offset) => {
                if value.is_zero() {
                    return;
                }
                if self.values.len() == self.values.capacity() {
                    let doubled = self.values.capacity().max(1) * 2;
                    self.values.reserve_exact(doubled - self.values.len());
                    self.columns.reserve_exact(doubled - self.columns.len());
                }
                let pos = range.start + offset;
                self.values.insert(pos, value);
                self.columns.insert(pos, c);
                for start in self.row_index[(r + 1)..].iter_mut() {
                    *start += 1;
                }
            }
        }
    }

    /// Iterate stored entries as (row, column, value) triples in row order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.rows).flat_map(move |r| {
            self.row_range(r)
                .map(move |pos| (r, self.columns[pos], self.values[pos]))
        })
    }

    /// Rebuild the structure with rows and columns exchanged
    ///
    /// Count-per-column, prefix-sum, scatter: the transposed scan order
    /// yields sorted columns without any per-row search.
    pub fn transposed(&self) -> CsrData<T> {
        let nnz = self.nnz();
        let mut counts = vec![0usize; self.cols + 1];
        for &c in &self.columns {
            counts[c + 1] += 1;
        }
        for c in 0..self.cols {
            counts[c + 1] += counts[c];
        }

        let mut values = vec![T::zero(); nnz];
        let mut columns = vec![0usize; nnz];
        let mut cursor = counts.clone();
        for (r, c, v) in self.entries() {
            let pos = cursor[c];
            values[pos] = v;
            columns[pos] = r;
            cursor[c] += 1;
        }

        CsrData {
            rows: self.cols,
            cols: self.rows,
            values,
            columns,
            row_index: counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Matrix:
    // [1, 0, 2]
    // [0, 0, 3]
    // [4, 5, 0]
    fn sample() -> CsrData<f64> {
        CsrData::from_parts(
            3,
            3,
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![0, 2, 2, 0, 1],
            vec![0, 2, 3, 5],
        )
        .unwrap()
    }

    #[test]
    fn test_csr_creation() {
        let csr = sample();
        assert_eq!(csr.nnz(), 5);
        assert_eq!(csr.nrows(), 3);
        assert_eq!(csr.ncols(), 3);
        assert!(csr.capacity() >= 5);
    }

    #[test]
    fn test_csr_get() {
        let csr = sample();
        assert_eq!(csr.get(0, 0), 1.0);
        assert_eq!(csr.get(0, 1), 0.0);
        assert_eq!(csr.get(0, 2), 2.0);
        assert_eq!(csr.get(1, 2), 3.0);
        assert_eq!(csr.get(2, 1), 5.0);
        assert_eq!(csr.get(2, 2), 0.0);
    }

    #[test]
    fn test_csr_set_update_and_insert() {
        let mut csr = sample();

        // In-place update
        csr.set(0, 0, 9.0);
        assert_eq!(csr.get(0, 0), 9.0);
        assert_eq!(csr.nnz(), 5);

        // Insert in the middle of row 0
        csr.set(0, 1, 7.0);
        assert_eq!(csr.get(0, 1), 7.0);
        assert_eq!(csr.nnz(), 6);
        assert_eq!(csr.columns(), &[0, 1, 2, 2, 0, 1]);
        assert_eq!(csr.row_index(), &[0, 3, 4, 6]);

        // Zero write to an absent slot leaves the structure unchanged
        csr.set(2, 2, 0.0);
        assert_eq!(csr.nnz(), 6);
    }

    #[test]
    fn test_csr_invalid_row_index() {
        let result = CsrData::from_parts(3, 3, vec![1.0], vec![0], vec![0, 1]);
        assert!(matches!(result, Err(crate::error::Error::DimensionMismatch { .. })));

        let result = CsrData::from_parts(2, 2, vec![1.0, 2.0], vec![1, 0], vec![0, 2, 2]);
        assert!(matches!(result, Err(crate::error::Error::OutOfRange { .. })));
    }

    #[test]
    fn test_csr_column_out_of_bounds() {
        let result = CsrData::from_parts(2, 2, vec![1.0], vec![5], vec![0, 1, 1]);
        assert!(matches!(
            result,
            Err(crate::error::Error::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_csr_transposed() {
        let t = sample().transposed();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t.ncols(), 3);
        assert_eq!(t.get(0, 0), 1.0);
        assert_eq!(t.get(2, 0), 2.0);
        assert_eq!(t.get(2, 1), 3.0);
        assert_eq!(t.get(0, 2), 4.0);
        assert_eq!(t.get(1, 2), 5.0);
        assert_eq!(t.get(1, 1), 0.0);
        assert_eq!(t.nnz(), 5);
    }

    #[test]
    fn test_capacity_doubling() {
        let mut csr = CsrData::<f64>::with_capacity(1, 8, 2);
        assert_eq!(csr.capacity(), 2);
        csr.set(0, 0, 1.0);
        csr.set(0, 1, 2.0);
        csr.set(0, 2, 3.0);
        assert!(csr.capacity() >= 4);
        assert_eq!(csr.nnz(), 3);
    }
}
