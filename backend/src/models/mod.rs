//! Domain models for the matrix pipeline.
//!
//! - [`RawGrid`] - rows of text tokens exactly as the CSV reader produced them
//! - [`Cell`] - one validated entry: original text plus parsed value
//! - [`Matrix`] - a validated, immutable N×N grid of cells
//! - [`FlatSequence`] - matrix cells in row-major order

use serde::Serialize;
use std::fmt;

/// Rows of text cells as produced by CSV parsing. May be empty or ragged.
pub type RawGrid = Vec<Vec<String>>;

// =============================================================================
// Cell
// =============================================================================

/// A single matrix entry.
///
/// The original token is kept so that echo output matches the upload
/// byte-for-byte (`+5`, `007`), while arithmetic uses the parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    raw: String,
    value: i64,
}

impl Cell {
    pub(crate) fn new(raw: String, value: i64) -> Self {
        Self { raw, value }
    }

    /// Token text as uploaded.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed integer value.
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// =============================================================================
// Matrix
// =============================================================================

/// A validated square matrix, stored row-major.
///
/// Only [`crate::validation::validate`] and the operations in
/// [`crate::transform`] build one, so `cells.len() == size * size` and
/// `size >= 1` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix {
    size: usize,
    cells: Vec<Cell>,
}

impl Matrix {
    pub(crate) fn from_cells(size: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// N, the number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry at `(row, col)`, or `None` when either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col)
    }

    /// Rows in order, each a slice of N cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows as plain token text.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.rows()
            .map(|row| row.iter().map(|c| c.raw.clone()).collect())
            .collect()
    }
}

/// One row per line, cells comma-joined, trailing newline.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            write_joined(f, row)?;
            f.write_str("\n")?;
        }
        Ok(())
    }
}

// =============================================================================
// Flat sequence
// =============================================================================

/// Matrix cells in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatSequence {
    cells: Vec<Cell>,
}

impl FlatSequence {
    pub(crate) fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Parsed values in sequence order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.cells.iter().map(Cell::value)
    }
}

/// A single comma-joined line with a trailing newline.
impl fmt::Display for FlatSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.cells)?;
        f.write_str("\n")
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, cells: &[Cell]) -> fmt::Result {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        f.write_str(&cell.raw)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[i64]) -> Vec<Cell> {
        values.iter().map(|v| Cell::new(v.to_string(), *v)).collect()
    }

    #[test]
    fn test_matrix_accessors() {
        let m = Matrix::from_cells(2, cells(&[1, 2, 3, 4]));
        assert_eq!(m.size(), 2);
        assert_eq!(m.get(1, 0).map(Cell::value), Some(3));
        assert_eq!(m.rows().count(), 2);
        assert_eq!(m.to_rows(), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let m = Matrix::from_cells(2, cells(&[1, 2, 3, 4]));
        assert!(m.get(2, 0).is_none());
        // Would alias (1, 0) with flat indexing
        assert!(m.get(0, 2).is_none());
        assert!(m.get(1, 1).is_some());
    }

    #[test]
    fn test_matrix_display() {
        let m = Matrix::from_cells(2, cells(&[1, 2, 3, 4]));
        assert_eq!(m.to_string(), "1,2\n3,4\n");
    }

    #[test]
    fn test_display_keeps_raw_text() {
        let m = Matrix::from_cells(1, vec![Cell::new("+007".into(), 7)]);
        assert_eq!(m.to_string(), "+007\n");
    }

    #[test]
    fn test_flat_display() {
        let flat = FlatSequence::new(cells(&[1, -2, 3]));
        assert_eq!(flat.to_string(), "1,-2,3\n");
        assert_eq!(flat.values().collect::<Vec<_>>(), vec![1, -2, 3]);
    }

    #[test]
    fn test_empty_flat_display() {
        let flat = FlatSequence::new(Vec::new());
        assert!(flat.is_empty());
        assert_eq!(flat.to_string(), "\n");
    }
}
