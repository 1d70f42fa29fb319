//! High-level pipeline API: uploaded bytes in, rendered result out.
//!
//! Combines every step: decoding, CSV parsing, validation and the selected
//! operation. The HTTP handlers and the CLI both go through here.
//!
//! # Example
//!
//! ```rust
//! use matrix_service::transform::{run_bytes, Operation, PipelineOptions};
//!
//! let out = run_bytes(b"1,2\n3,4\n", Operation::Sum, &PipelineOptions::default()).unwrap();
//! assert_eq!(out, "10\n");
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::operations::Operation;
use crate::error::{CsvError, PipelineResult};
use crate::models::Matrix;
use crate::parser::{parse_bytes, DEFAULT_DELIMITER};
use crate::validation::validate;

/// Options for the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// CSV field delimiter
    pub delimiter: char,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Decode, parse and validate uploaded bytes.
pub fn load_matrix(bytes: &[u8], options: &PipelineOptions) -> PipelineResult<Matrix> {
    let parsed = parse_bytes(bytes, options.delimiter)?;
    Ok(validate(&parsed.rows)?)
}

/// Run one operation over uploaded bytes.
pub fn run_bytes(
    bytes: &[u8],
    operation: Operation,
    options: &PipelineOptions,
) -> PipelineResult<String> {
    let matrix = load_matrix(bytes, options)?;
    Ok(operation.apply(&matrix))
}

/// Run one operation over a CSV file on disk.
pub fn run_file(
    path: &Path,
    operation: Operation,
    options: &PipelineOptions,
) -> PipelineResult<String> {
    let bytes = std::fs::read(path).map_err(CsvError::from)?;
    run_bytes(&bytes, operation, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MatrixError, PipelineError};
    use std::io::Write;

    const SAMPLE: &[u8] = b"1,2,3\n4,5,6\n7,8,9";

    #[test]
    fn test_default_options() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.delimiter, ',');
    }

    #[test]
    fn test_run_every_operation() {
        let opts = PipelineOptions::default();
        let run = |op| run_bytes(SAMPLE, op, &opts).unwrap();

        assert_eq!(run(Operation::Echo), "1,2,3\n4,5,6\n7,8,9\n");
        assert_eq!(run(Operation::Invert), "1,4,7\n2,5,8\n3,6,9\n");
        assert_eq!(run(Operation::Flatten), "1,2,3,4,5,6,7,8,9\n");
        assert_eq!(run(Operation::Sum), "45\n");
        assert_eq!(run(Operation::Multiply), "362880\n");
    }

    #[test]
    fn test_not_square_input() {
        let err = run_bytes(b"1,2,3\n4,5,6", Operation::Echo, &PipelineOptions::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Matrix(MatrixError::NotSquare)));
    }

    #[test]
    fn test_non_integer_input() {
        let err = run_bytes(b"1,2,a\n4,5,6\n7,8,9", Operation::Sum, &PipelineOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid matrix: all values must be integers");
    }

    #[test]
    fn test_empty_input() {
        let err = run_bytes(b"", Operation::Echo, &PipelineOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Matrix(MatrixError::EmptyInput)));
    }

    #[test]
    fn test_csv_error_prefix() {
        let opts = PipelineOptions { delimiter: '€' };
        let err = run_bytes(SAMPLE, Operation::Echo, &opts).unwrap_err();
        assert!(err.to_string().starts_with("error to parse file:"));
    }

    #[test]
    fn test_run_file_with_delimiter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1;2\n3;4\n").unwrap();

        let opts = PipelineOptions { delimiter: ';' };
        let out = run_file(file.path(), Operation::Invert, &opts).unwrap();
        assert_eq!(out, "1,3\n2,4\n");
    }

    #[test]
    fn test_run_missing_file() {
        let err = run_file(
            Path::new("/nonexistent/matrix.csv"),
            Operation::Echo,
            &PipelineOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to read file"));
    }
}
