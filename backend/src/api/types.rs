//! HTTP API types.
//!
//! Matrix results and errors travel as plain text; only the health check
//! answers in JSON.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::server::ROUTES;
use crate::error::ServerError;

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always "ok" while the server is answering
    pub status: String,

    pub service: String,

    pub version: String,

    /// One entry per matrix route
    pub endpoints: Vec<EndpointInfo>,
}

/// A registered matrix endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub operation: String,
}

impl HealthResponse {
    pub fn current() -> Self {
        Self {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: ROUTES
                .iter()
                .map(|(path, op)| EndpointInfo {
                    method: "POST".to_string(),
                    path: path.to_string(),
                    operation: op.name().to_string(),
                })
                .collect(),
        }
    }
}

/// Create a plain-text error response
pub fn error_response(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, format!("{}\n", message)).into_response()
}

/// Every server error is a client input problem.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error_response(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;

    #[test]
    fn test_health_lists_routes() {
        let health = HealthResponse::current();
        let json = serde_json::to_value(&health).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(health.endpoints.len(), ROUTES.len());
        assert!(health
            .endpoints
            .iter()
            .any(|e| e.path == "/invert" && e.operation == "invert"));
    }

    #[test]
    fn test_server_error_is_bad_request() {
        let response = ServerError::from(MatrixError::RaggedShape).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
