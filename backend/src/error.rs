//! Error types for the matrix service.
//!
//! This module defines the error hierarchy, from the innermost layer out:
//!
//! - [`MatrixError`] - the uploaded grid is not a square integer matrix
//! - [`CsvError`] - the uploaded bytes could not be decoded or lexed as CSV
//! - [`PipelineError`] - anything that can go wrong between bytes and result
//! - [`ServerError`] - pipeline errors plus upload failures at the HTTP layer
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. The `Display` output of
//! each variant is the exact text returned to HTTP clients.

use thiserror::Error;

// =============================================================================
// Matrix Validation Errors
// =============================================================================

/// Reasons a parsed grid is rejected as a matrix.
///
/// Checks run in declaration order and stop at the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// No rows at all.
    #[error("CSV file is empty")]
    EmptyInput,

    /// Rows do not all have the width of the first row.
    #[error("invalid matrix: inconsistent number of columns")]
    RaggedShape,

    /// At least one cell is not a base-10 integer.
    #[error("invalid matrix: all values must be integers")]
    NonIntegerValue,

    /// Rectangular and numeric, but rows != columns.
    #[error("invalid matrix: must be a square matrix (NxN)")]
    NotSquare,
}

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while turning uploaded bytes into rows of text.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Bytes could not be decoded.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Delimiter is not a single-byte ASCII character.
    #[error("unsupported delimiter '{0}': must be a single ASCII character")]
    Delimiter(char),

    /// The CSV reader rejected the input.
    #[error("{0}")]
    Parse(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors
// =============================================================================

/// Errors from the bytes -> matrix -> result pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV decoding or lexing failed.
    #[error("error to parse file: {0}")]
    Csv(#[from] CsvError),

    /// The grid is not a valid square integer matrix.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP layer errors. Every variant maps to `400 Bad Request`.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No usable `file` field in the multipart body.
    #[error("error to read file: {0}")]
    Upload(String),

    /// Processing the uploaded file failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl From<MatrixError> for ServerError {
    fn from(err: MatrixError) -> Self {
        ServerError::Pipeline(err.into())
    }
}

impl From<CsvError> for ServerError {
    fn from(err: CsvError) -> Self {
        ServerError::Pipeline(err.into())
    }
}

// =============================================================================
// Operation lookup
// =============================================================================

/// An operation name that is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation '{0}' (expected one of: echo, invert, flatten, sum, multiply, report)")]
pub struct UnknownOperation(pub String);

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for matrix validation.
pub type MatrixResult<T> = Result<T, MatrixError>;

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
