//! Core Matrix type: construction, element access, names, conversions

use std::collections::BTreeMap;

use super::storage::{CsrData, Storage, StorageOrder, StorageScheme};
use crate::error::{Error, Result};
use crate::scalar::{Complex64, Scalar};

/// The reserved wildcard token; row/column names may not equal it
pub const WILDCARD_TOKEN: &str = ":";

/// A numeric matrix over one scalar domain
///
/// `Matrix` owns one [`Storage`] instance, either dense column-major or
/// compressed-row sparse, behind a single logical interface. Rows and
/// columns may carry optional display labels; labels are kept as a sparse
/// index-to-name map, at most one label per index.
///
/// Dimensions are always at least 1x1. Every operator validates its inputs
/// eagerly and reports the offending parameter by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T: Scalar> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) storage: Storage<T>,
    pub(crate) name: Option<String>,
    pub(crate) row_names: BTreeMap<usize, String>,
    pub(crate) col_names: BTreeMap<usize, String>,
}

/// Matrix of double-precision real elements
pub type RealMatrix = Matrix<f64>;

/// Matrix of double-precision complex elements
pub type ComplexMatrix = Matrix<Complex64>;

fn validate_dims(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 {
        return Err(Error::out_of_range("rows", "must be at least 1"));
    }
    if cols == 0 {
        return Err(Error::out_of_range("columns", "must be at least 1"));
    }
    Ok(())
}

fn validate_name(param: &'static str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_name(param, "must not be empty or whitespace"));
    }
    if name == WILDCARD_TOKEN {
        return Err(Error::invalid_name(
            param,
            format!("'{}' is the reserved wildcard token", WILDCARD_TOKEN),
        ));
    }
    Ok(())
}

impl<T: Scalar> Matrix<T> {
    fn from_storage(rows: usize, cols: usize, storage: Storage<T>) -> Self {
        Self {
            rows,
            cols,
            storage,
            name: None,
            row_names: BTreeMap::new(),
            col_names: BTreeMap::new(),
        }
    }

    /// Create a dense matrix from a column-major flat array
    ///
    /// # Errors
    ///
    /// Fails if a dimension is zero or `data.len() != rows * cols`.
    pub fn from_column_major(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        Self::with_order(rows, cols, data, StorageOrder::ColumnMajor)
    }

    /// Create a dense matrix from a row-major flat array
    pub fn from_row_major(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        Self::with_order(rows, cols, data, StorageOrder::RowMajor)
    }

    /// Create a dense matrix from a flat array read in the given order
    ///
    /// Internal storage is always column-major; row-major input is
    /// re-ordered on construction.
    pub fn with_order(
        rows: usize,
        cols: usize,
        data: &[T],
        order: StorageOrder,
    ) -> Result<Self> {
        validate_dims(rows, cols)?;
        if data.len() != rows * cols {
            return Err(Error::dimension_mismatch(&[rows * cols], &[data.len()]));
        }
        let buf = match order {
            StorageOrder::ColumnMajor => data.to_vec(),
            StorageOrder::RowMajor => {
                let mut buf = vec![T::zero(); rows * cols];
                for r in 0..rows {
                    for c in 0..cols {
                        buf[c * rows + r] = data[r * cols + c];
                    }
                }
                buf
            }
        };
        Ok(Self::from_storage(rows, cols, Storage::Dense(buf)))
    }

    /// Create a dense matrix with every element set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        validate_dims(rows, cols)?;
        Ok(Self::from_storage(
            rows,
            cols,
            Storage::Dense(vec![value; rows * cols]),
        ))
    }

    /// Create a dense matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, T::zero())
    }

    /// Create an all-zero compressed-row sparse matrix with reserved
    /// capacity for `capacity` nonzero entries
    pub fn sparse(rows: usize, cols: usize, capacity: usize) -> Result<Self> {
        validate_dims(rows, cols)?;
        Ok(Self::from_storage(
            rows,
            cols,
            Storage::Sparse(CsrData::with_capacity(rows, cols, capacity)),
        ))
    }

    /// Create a sparse matrix from raw CSR components
    pub fn from_sparse_parts(
        rows: usize,
        cols: usize,
        values: Vec<T>,
        columns: Vec<usize>,
        row_index: Vec<usize>,
    ) -> Result<Self> {
        validate_dims(rows, cols)?;
        let csr = CsrData::from_parts(rows, cols, values, columns, row_index)?;
        Ok(Self::from_storage(rows, cols, Storage::Sparse(csr)))
    }

    /// Create the n-by-n identity matrix (dense)
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.set(i, i, T::one())?;
        }
        Ok(m)
    }

    /// Create a square matrix with `diag` on the main diagonal (dense)
    pub fn diagonal(diag: &[T]) -> Result<Self> {
        let n = diag.len();
        let mut m = Self::zeros(n, n)?;
        for (i, &v) in diag.iter().enumerate() {
            m.set(i, i, v)?;
        }
        Ok(m)
    }

    /// Create a 1x1 matrix holding a single value
    pub fn scalar(value: T) -> Self {
        Self::from_storage(1, 1, Storage::Dense(vec![value]))
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

    /// Shape as [rows, cols]
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    /// Total logical element count
    #[inline]
    pub fn count(&self) -> usize {
        self.rows * self.cols
    }

    /// Physical layout tag
    #[inline]
    pub fn scheme(&self) -> StorageScheme {
        self.storage.scheme()
    }

    /// Stored nonzero count for sparse storage; the full element count for
    /// dense storage
    pub fn stored_count(&self) -> usize {
        match &self.storage {
            Storage::Dense(data) => data.len(),
            Storage::Sparse(csr) => csr.nnz(),
        }
    }

    pub(crate) fn check_row(&self, param: &'static str, r: usize) -> Result<()> {
        if r >= self.rows {
            return Err(Error::index_out_of_bounds(param, r, self.rows));
        }
        Ok(())
    }

    pub(crate) fn check_col(&self, param: &'static str, c: usize) -> Result<()> {
        if c >= self.cols {
            return Err(Error::index_out_of_bounds(param, c, self.cols));
        }
        Ok(())
    }

    /// Unchecked element read; callers validate indices first
    #[inline]
    pub(crate) fn at(&self, r: usize, c: usize) -> T {
        match &self.storage {
            Storage::Dense(data) => data[c * self.rows + r],
            Storage::Sparse(csr) => csr.get(r, c),
        }
    }

    /// Read the element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_row("row_index", row)?;
        self.check_col("column_index", col)?;
        Ok(self.at(row, col))
    }

    /// Write the element at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_row("row_index", row)?;
        self.check_col("column_index", col)?;
        match &mut self.storage {
            Storage::Dense(data) => data[col * self.rows + row] = value,
            Storage::Sparse(csr) => csr.set(row, col, value),
        }
        Ok(())
    }

    /// Dense copy of this matrix (same values, dense scheme, names kept)
    pub fn to_dense(&self) -> Matrix<T> {
        match &self.storage {
            Storage::Dense(_) => self.clone(),
            Storage::Sparse(csr) => {
                let mut buf = vec![T::zero(); self.rows * self.cols];
                for (r, c, v) in csr.entries() {
                    buf[c * self.rows + r] = v;
                }
                let mut out = Self::from_storage(self.rows, self.cols, Storage::Dense(buf));
                out.copy_names_from(self);
                out
            }
        }
    }

    /// Sparse copy of this matrix (zero elements dropped, names kept)
    pub fn to_sparse(&self) -> Matrix<T> {
        match &self.storage {
            Storage::Sparse(_) => self.clone(),
            Storage::Dense(data) => {
                let mut values = Vec::new();
                let mut columns = Vec::new();
                let mut row_index = Vec::with_capacity(self.rows + 1);
                row_index.push(0);
                for r in 0..self.rows {
                    for c in 0..self.cols {
                        let v = data[c * self.rows + r];
                        if !v.is_zero() {
                            values.push(v);
                            columns.push(c);
                        }
                    }
                    row_index.push(values.len());
                }
                let csr = CsrData::from_parts(self.rows, self.cols, values, columns, row_index)
                    .expect("dense scan produces a consistent CSR structure");
                let mut out = Self::from_storage(self.rows, self.cols, Storage::Sparse(csr));
                out.copy_names_from(self);
                out
            }
        }
    }

    /// Extract the single element of a 1x1 matrix
    ///
    /// # Errors
    ///
    /// Fails with a dimension mismatch unless the matrix is exactly 1x1.
    pub fn to_scalar(&self) -> Result<T> {
        if self.rows != 1 || self.cols != 1 {
            return Err(Error::dimension_mismatch(&[1, 1], &[self.rows, self.cols]));
        }
        Ok(self.at(0, 0))
    }

    /// Column-major copy of all elements as a flat vector
    pub fn to_column_major(&self) -> Vec<T> {
        match &self.storage {
            Storage::Dense(data) => data.clone(),
            Storage::Sparse(csr) => {
                let mut buf = vec![T::zero(); self.rows * self.cols];
                for (r, c, v) in csr.entries() {
                    buf[c * self.rows + r] = v;
                }
                buf
            }
        }
    }

    /// Borrow the CSR structure if this matrix is sparse
    pub fn csr(&self) -> Option<&CsrData<T>> {
        match &self.storage {
            Storage::Sparse(csr) => Some(csr),
            Storage::Dense(_) => None,
        }
    }

    pub(crate) fn copy_names_from(&mut self, other: &Matrix<T>) {
        self.name = other.name.clone();
        self.row_names = other.row_names.clone();
        self.col_names = other.col_names.clone();
    }

    /// Set the display name of the whole matrix
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        validate_name("name", &name)?;
        self.name = Some(name);
        Ok(())
    }

    /// The display name, if set
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Label a row
    ///
    /// # Errors
    ///
    /// Fails if the index is out of range or the name is empty, whitespace,
    /// or the reserved wildcard token.
    pub fn set_row_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.check_row("row_index", index)?;
        let name = name.into();
        validate_name("row_name", &name)?;
        self.row_names.insert(index, name);
        Ok(())
    }

    /// Label a column
    pub fn set_column_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        self.check_col("column_index", index)?;
        let name = name.into();
        validate_name("column_name", &name)?;
        self.col_names.insert(index, name);
        Ok(())
    }

    /// The label of a row, if one was set
    pub fn try_get_row_name(&self, index: usize) -> Option<&str> {
        self.row_names.get(&index).map(String::as_str)
    }

    /// The label of a column, if one was set
    pub fn try_get_column_name(&self, index: usize) -> Option<&str> {
        self.col_names.get(&index).map(String::as_str)
    }

    /// Remove a row label; returns whether one was present
    pub fn remove_row_name(&mut self, index: usize) -> bool {
        self.row_names.remove(&index).is_some()
    }

    /// Remove a column label; returns whether one was present
    pub fn remove_column_name(&mut self, index: usize) -> bool {
        self.col_names.remove(&index).is_some()
    }

    /// Remove every row label
    pub fn remove_all_row_names(&mut self) {
        self.row_names.clear();
    }

    /// Remove every column label
    pub fn remove_all_column_names(&mut self) {
        self.col_names.clear();
    }

    /// Whether any row carries a label
    pub fn has_row_names(&self) -> bool {
        !self.row_names.is_empty()
    }

    /// Whether any column carries a label
    pub fn has_column_names(&self) -> bool {
        !self.col_names.is_empty()
    }
}

impl Matrix<f64> {
    /// Promote to a complex matrix with zero imaginary parts
    ///
    /// The storage scheme and all names are preserved. This is the bridge
    /// behind the mixed real/complex operator pairings.
    pub fn to_complex(&self) -> Matrix<Complex64> {
        let storage = match &self.storage {
            Storage::Dense(data) => Storage::Dense(
                data.iter().map(|&v| Complex64::new(v, 0.0)).collect(),
            ),
            Storage::Sparse(csr) => {
                let values = csr.values().iter().map(|&v| Complex64::new(v, 0.0)).collect();
                let promoted = CsrData::from_parts(
                    csr.nrows(),
                    csr.ncols(),
                    values,
                    csr.columns().to_vec(),
                    csr.row_index().to_vec(),
                )
                .expect("promotion preserves CSR consistency");
                Storage::Sparse(promoted)
            }
        };
        Matrix {
            rows: self.rows,
            cols: self.cols,
            storage,
            name: self.name.clone(),
            row_names: self.row_names.clone(),
            col_names: self.col_names.clone(),
        }
    }
}
