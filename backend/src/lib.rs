//! # Matrix service - square integer matrix operations over HTTP
//!
//! Accepts a square matrix of integers uploaded as CSV and returns it echoed,
//! transposed, flattened, summed or multiplied.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV upload │────▶│   Parser    │────▶│  Validator  │────▶│  Operation  │
//! │  (`file`)   │     │  (RawGrid)  │     │  (Matrix)   │     │  (text)     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use matrix_service::{run_bytes, Operation, PipelineOptions};
//!
//! let csv = b"1,2,3\n4,5,6\n7,8,9";
//! let out = run_bytes(csv, Operation::Invert, &PipelineOptions::default()).unwrap();
//! assert_eq!(out, "1,4,7\n2,5,8\n3,6,9\n");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (RawGrid, Matrix, FlatSequence)
//! - [`parser`] - CSV parsing with encoding detection
//! - [`validation`] - Square integer matrix validation
//! - [`transform`] - Matrix operations and pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError,
    MatrixError,
    PipelineError,
    ServerError,
    UnknownOperation,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Cell, FlatSequence, Matrix, RawGrid};

// =============================================================================
// Re-exports - Parsing & Validation
// =============================================================================

pub use parser::{decode_content, detect_encoding, parse_bytes, parse_str, ParseResult};
pub use validation::{is_valid, validate};

// =============================================================================
// Re-exports - Operations & Pipeline
// =============================================================================

pub use transform::operations::{
    echo,
    flatten,
    multiply,
    operations_description,
    report,
    sum,
    transpose,
    Operation,
};

pub use transform::pipeline::{load_matrix, run_bytes, run_file, PipelineOptions};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, EndpointInfo, HealthResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server, ServerConfig, ROUTES};
}
