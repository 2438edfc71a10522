use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

const ERROR_BODY_LIMIT: usize = 4096;

/// Logs the body of any 5xx response before passing it on. The client still
/// only sees the generic message the error type produced.
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if response.status().is_server_error() {
        let (mut parts, body) = response.into_parts();
        let bytes = match to_bytes(body, ERROR_BODY_LIMIT).await {
            Ok(b) => b,
            Err(e) => {
                error!("failed to read error response body: {}", e);
                return Response::from_parts(parts, Body::empty());
            }
        };
        let body_str = String::from_utf8_lossy(&bytes);

        error!(
            "server error - {} {} - status: {}, body: {}",
            method, uri, parts.status, body_str
        );

        parts.headers.remove(axum::http::header::CONTENT_LENGTH);
        Response::from_parts(parts, Body::from(bytes))
    } else {
        response
    }
}
