//! Transformation module.
//!
//! - Operations: echo, transpose, flatten, sum, multiply, report
//! - Pipeline: bytes to rendered result

pub mod operations;
pub mod pipeline;

pub use operations::*;
pub use pipeline::*;
