//! HTTP API module.
//!
//! This module provides the HTTP server, its response types and the log
//! stream.

pub mod server;
pub mod types;
pub mod logs;

pub use server::{router, start_server, ServerConfig, ROUTES};
pub use types::*;
pub use logs::*;
