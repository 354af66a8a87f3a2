use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, error, info};

/// Request logging middleware: one entry event, one exit event with status
/// and latency, for every route.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    debug!(%method, %path, "request received");
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    if status.is_server_error() {
        error!(%method, %path, %status, latency_ms, "request failed");
    } else {
        info!(%method, %path, %status, latency_ms, "request completed");
    }

    response
}
