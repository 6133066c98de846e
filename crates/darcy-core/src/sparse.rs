//! Row-compressed sparse matrix with a fixed layout.
//!
//! The layout is three parallel arrays built once at assembly time:
//!
//! ```text
//! values:         [ v00 v01 | v10 v11 v12 | v20 ... ]
//! column_indices: [ c00 c01 | c10 c11 c12 | c20 ... ]
//! row_starts:     [ 0       , 2           , 5   ... ]
//! ```
//!
//! There is no trailing sentinel in `row_starts`; the last row ends at
//! `values.len()`. Columns within a row are sorted once at construction and
//! never re-checked afterwards. Values may be overwritten in place, but no
//! entry can be added or removed.

use sprs::{CsMat, TriMat};

use crate::error::{DarcyError, DarcyResult};

/// Compact row-compressed matrix of `f32` values.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    values: Vec<f32>,
    column_indices: Vec<usize>,
    row_starts: Vec<usize>,
    n_cols: usize,
}

/// Slice boundaries of one row: `values[start..end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

impl RowSpan {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl SparseMatrix {
    /// Build from raw row-compressed arrays and sort every row by column.
    ///
    /// Rows may arrive in any column order. Fails if the arrays are not the
    /// same length, if `row_starts` decreases or points past the end, or if
    /// a row stores the same column twice.
    pub fn new(
        values: Vec<f32>,
        column_indices: Vec<usize>,
        row_starts: Vec<usize>,
    ) -> DarcyResult<Self> {
        if values.len() != column_indices.len() {
            return Err(DarcyError::MalformedMatrix(format!(
                "{} values but {} column indices",
                values.len(),
                column_indices.len()
            )));
        }
        if let Some(&first) = row_starts.first() {
            if first != 0 {
                return Err(DarcyError::MalformedMatrix(format!(
                    "first row starts at {first}, expected 0"
                )));
            }
        } else if !values.is_empty() {
            return Err(DarcyError::MalformedMatrix(
                "values present but no rows".to_string(),
            ));
        }
        if let Some(w) = row_starts.windows(2).position(|w| w[1] < w[0]) {
            return Err(DarcyError::MalformedMatrix(format!(
                "row {} starts before row {}",
                w + 1,
                w
            )));
        }
        if let Some(&last) = row_starts.last() {
            if last > values.len() {
                return Err(DarcyError::MalformedMatrix(format!(
                    "row start {last} is past the {} stored values",
                    values.len()
                )));
            }
        }

        let n_cols = column_indices.iter().max().map_or(0, |&c| c + 1);
        let mut matrix = Self {
            values,
            column_indices,
            row_starts,
            n_cols,
        };
        matrix.sort_rows();

        for span in matrix.rows() {
            let cols = &matrix.column_indices[span.range()];
            if let Some(pair) = cols.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(DarcyError::MalformedMatrix(format!(
                    "row {} stores column {} twice",
                    span.row, pair[0]
                )));
            }
        }

        Ok(matrix)
    }

    /// Reorder each row's (column, value) pairs by ascending column.
    fn sort_rows(&mut self) {
        let spans: Vec<RowSpan> = self.rows().collect();
        let mut pairs: Vec<(usize, f32)> = Vec::new();
        for span in spans {
            let cols = &mut self.column_indices[span.range()];
            if cols.windows(2).all(|w| w[0] <= w[1]) {
                continue;
            }
            let vals = &mut self.values[span.range()];
            pairs.clear();
            pairs.extend(cols.iter().copied().zip(vals.iter().copied()));
            pairs.sort_by_key(|&(col, _)| col);
            for (k, (col, val)) in pairs.iter().enumerate() {
                cols[k] = *col;
                vals[k] = *val;
            }
        }
    }

    /// `(rows, cols)`, with `cols = max(column index) + 1`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_starts.len(), self.n_cols)
    }

    pub fn n_rows(&self) -> usize {
        self.row_starts.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Matrix density (nnz / rows·cols).
    pub fn density(&self) -> f64 {
        let (r, c) = self.shape();
        if r == 0 || c == 0 {
            return 0.0;
        }
        self.nnz() as f64 / (r * c) as f64
    }

    /// Memory usage in bytes (approximate).
    pub fn memory_bytes(&self) -> usize {
        let nnz = self.nnz();
        nnz * std::mem::size_of::<f32>()
            + nnz * std::mem::size_of::<usize>()
            + self.n_rows() * std::mem::size_of::<usize>()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn column_indices(&self) -> &[usize] {
        &self.column_indices
    }

    pub fn row_starts(&self) -> &[usize] {
        &self.row_starts
    }

    /// `[start, end)` offsets of `row`. Panics if `row` is out of range.
    #[inline]
    pub fn row_bounds(&self, row: usize) -> (usize, usize) {
        let start = self.row_starts[row];
        let end = self
            .row_starts
            .get(row + 1)
            .copied()
            .unwrap_or(self.values.len());
        (start, end)
    }

    /// Iterate over every row's slice boundaries, including the implicit
    /// end of the last row.
    pub fn rows(&self) -> RowSpans<'_> {
        RowSpans {
            row_starts: &self.row_starts,
            nnz: self.values.len(),
            next: 0,
        }
    }

    /// Iterate over the `(column, value)` pairs of `row`. Panics if `row` is
    /// out of range; use [`get`](Self::get) for checked lookups.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let (start, end) = self.row_bounds(row);
        self.column_indices[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    /// Linear position of `(row, col)` in `values`, if stored.
    pub fn position(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.n_rows() {
            return None;
        }
        let (start, end) = self.row_bounds(row);
        for idx in start..end {
            let c = self.column_indices[idx];
            if c == col {
                return Some(idx);
            }
            if c > col {
                break;
            }
        }
        None
    }

    /// Value at `(row, col)`, or `0.0` when nothing is stored there.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.position(row, col).map_or(0.0, |idx| self.values[idx])
    }

    /// Raw stored value at linear position `index`.
    #[inline]
    pub fn value(&self, index: usize) -> f32 {
        self.values[index]
    }

    /// Overwrite the stored entry at `(row, col)`.
    ///
    /// Returns [`DarcyError::StructuralViolation`] and leaves the matrix
    /// untouched when no entry was allocated there.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> DarcyResult<()> {
        let idx = self
            .position(row, col)
            .ok_or(DarcyError::StructuralViolation { row, col })?;
        self.values[idx] = value;
        Ok(())
    }

    /// Overwrite the raw stored value at linear position `index`.
    #[inline]
    pub fn set_value(&mut self, index: usize, value: f32) {
        self.values[index] = value;
    }

    /// Linear positions of the diagonal entries, one per row.
    pub fn diagonal_positions(&self) -> Vec<Option<usize>> {
        (0..self.n_rows()).map(|row| self.position(row, row)).collect()
    }

    /// Convert to a `sprs` CSR matrix for general sparse algebra.
    pub fn to_csr(&self) -> CsMat<f32> {
        let mut triplets = TriMat::new(self.shape());
        for span in self.rows() {
            for idx in span.range() {
                triplets.add_triplet(span.row, self.column_indices[idx], self.values[idx]);
            }
        }
        triplets.to_csr()
    }
}

/// Restartable iterator over [`RowSpan`]s; see [`SparseMatrix::rows`].
#[derive(Debug, Clone)]
pub struct RowSpans<'a> {
    row_starts: &'a [usize],
    nnz: usize,
    next: usize,
}

impl Iterator for RowSpans<'_> {
    type Item = RowSpan;

    fn next(&mut self) -> Option<RowSpan> {
        let row = self.next;
        let start = *self.row_starts.get(row)?;
        let end = self.row_starts.get(row + 1).copied().unwrap_or(self.nnz);
        self.next += 1;
        Some(RowSpan { row, start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.row_starts.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowSpans<'_> {}
