//! HTTP Server for the matrix API.
//!
//! Every matrix endpoint takes a `multipart/form-data` body with a `file`
//! field holding CSV text, and answers in plain text.
//!
//! # API Endpoints
//!
//! | Method | Path        | Description                          |
//! |--------|-------------|--------------------------------------|
//! | POST   | `/`         | Alias of `/echo`                     |
//! | POST   | `/echo`     | Matrix as uploaded                   |
//! | POST   | `/invert`   | Transposed matrix                    |
//! | POST   | `/flatten`  | All values on one line               |
//! | POST   | `/sum`      | Sum of all values                    |
//! | POST   | `/multiply` | Product of all values                |
//! | POST   | `/report`   | Every representation at once         |
//! | GET    | `/health`   | Health check                         |
//! | GET    | `/logs`     | SSE stream for real-time logs        |

use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    http::{header, Method},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{
    convert::Infallible,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::logs::{log_info, log_info_indent, log_success, log_warning, LOG_BROADCASTER};
use super::types::HealthResponse;
use crate::error::{ServerError, ServerResult};
use crate::transform::{run_bytes, Operation, PipelineOptions};

/// Matrix routes, fixed for the lifetime of the process.
pub const ROUTES: &[(&str, Operation)] = &[
    ("/", Operation::Echo),
    ("/echo", Operation::Echo),
    ("/invert", Operation::Invert),
    ("/flatten", Operation::Flatten),
    ("/sum", Operation::Sum),
    ("/multiply", Operation::Multiply),
    ("/report", Operation::Report),
];

/// Multipart field carrying the CSV upload
pub const FILE_FIELD: &str = "file";

/// Listening address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
        }
    }
}

/// Build the application router
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    ROUTES
        .iter()
        .fold(Router::new(), |router, &(path, operation)| {
            router.route(
                path,
                post(move |upload: Result<Multipart, MultipartRejection>| {
                    handle_upload(operation, upload)
                }),
            )
        })
        .route("/health", get(health))
        .route("/logs", get(sse_logs))
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!("🚀 Matrix server running on http://{}", addr);
    for (path, operation) in ROUTES {
        println!("   POST {:<10} - {}", path, operation.description());
    }
    println!("   GET  /health    - Health check");
    println!("   GET  /logs      - SSE log stream");
    println!();

    axum::serve(listener, router()).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip missed entries
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Matrix upload endpoint, shared by every route in [`ROUTES`]
async fn handle_upload(
    operation: Operation,
    upload: Result<Multipart, MultipartRejection>,
) -> ServerResult<String> {
    let request_id = Uuid::new_v4().simple().to_string();
    let request_id = &request_id[..8];

    let result = process_upload(operation, upload, request_id).await;

    match &result {
        Ok(body) => log_success(format!(
            "[{}] {} answered ({} bytes)",
            request_id,
            operation,
            body.len()
        )),
        Err(e) => log_warning(format!("[{}] {} rejected: {}", request_id, operation, e)),
    }

    result
}

async fn process_upload(
    operation: Operation,
    upload: Result<Multipart, MultipartRejection>,
    request_id: &str,
) -> ServerResult<String> {
    let multipart = upload.map_err(|e| ServerError::Upload(e.to_string()))?;
    let (file_name, bytes) = read_file_field(multipart).await?;

    log_info(format!("[{}] {} upload", request_id, operation));
    log_info_indent(
        format!(
            "{} ({} bytes)",
            file_name.as_deref().unwrap_or("unnamed"),
            bytes.len()
        ),
        1,
    );

    Ok(run_bytes(&bytes, operation, &PipelineOptions::default())?)
}

/// Read the `file` field. Other fields are ignored; the last `file` wins.
async fn read_file_field(mut multipart: Multipart) -> ServerResult<(Option<String>, Vec<u8>)> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::Upload(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::Upload(e.to_string()))?;
        file = Some((file_name, bytes.to_vec()));
    }

    file.ok_or_else(|| ServerError::Upload("no file provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_cover_every_operation() {
        for op in Operation::ALL {
            assert!(
                ROUTES.iter().any(|(_, route_op)| *route_op == op),
                "{} has no route",
                op
            );
        }
    }

    #[test]
    fn test_route_paths_unique() {
        let mut paths: Vec<_> = ROUTES.iter().map(|(path, _)| *path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ROUTES.len());
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }
}
