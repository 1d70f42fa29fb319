//! Square integer matrix validation.
//!
//! Turns a [`RawGrid`] from the CSV reader into a [`Matrix`], or rejects it.
//!
//! # Check order
//!
//! 1. at least one row ([`MatrixError::EmptyInput`])
//! 2. every row as wide as the first ([`MatrixError::RaggedShape`])
//! 3. every cell a base-10 `i64` ([`MatrixError::NonIntegerValue`])
//! 4. as many rows as columns ([`MatrixError::NotSquare`])
//!
//! The shape pass covers all rows before any cell is parsed, so a grid that
//! is both ragged and non-numeric always reports the shape problem.
//!
//! # Example
//!
//! ```rust
//! use matrix_service::validation::validate;
//!
//! let raw = vec![
//!     vec!["1".to_string(), "2".to_string()],
//!     vec!["3".to_string(), "4".to_string()],
//! ];
//! let matrix = validate(&raw).unwrap();
//! assert_eq!(matrix.size(), 2);
//! ```

use crate::error::{MatrixError, MatrixResult};
use crate::models::{Cell, Matrix, RawGrid};

/// Validate a raw grid as an N×N integer matrix.
pub fn validate(raw: &RawGrid) -> MatrixResult<Matrix> {
    let first = raw.first().ok_or(MatrixError::EmptyInput)?;
    let cols = first.len();

    if raw.iter().any(|row| row.len() != cols) {
        return Err(MatrixError::RaggedShape);
    }

    let cells = raw
        .iter()
        .flatten()
        .map(|token| parse_cell(token))
        .collect::<MatrixResult<Vec<Cell>>>()?;

    if raw.len() != cols {
        return Err(MatrixError::NotSquare);
    }

    Ok(Matrix::from_cells(cols, cells))
}

/// Quick check: true if `validate` would succeed.
pub fn is_valid(raw: &RawGrid) -> bool {
    validate(raw).is_ok()
}

// `i64::from_str` accepts an optional sign and rejects whitespace,
// separators and out-of-range values.
fn parse_cell(token: &str) -> MatrixResult<Cell> {
    token
        .parse::<i64>()
        .map(|value| Cell::new(token.to_string(), value))
        .map_err(|_| MatrixError::NonIntegerValue)
}
