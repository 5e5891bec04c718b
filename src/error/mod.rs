// Error types for the prompt2img gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Gateway error taxonomy.
///
/// Upstream HTTP statuses and transport failures are classified once, in the
/// Chutes client, and surface to the HTTP caller through a fixed mapping.
/// Nothing in the core retries; a client may simply re-issue the request.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid API key, upstream rejected the request: {0}")]
    Unauthorized(String),

    #[error("model or endpoint not found: {0}")]
    NotFound(String),

    #[error("rate limited by upstream: {0}")]
    RateLimited(String),

    #[error("upstream server error: {0}")]
    UpstreamServer(String),

    #[error("upstream rejected the payload: {0}")]
    BadRequest(String),

    #[error("generation timed out after {0} seconds; try a simpler prompt")]
    Timeout(u64),

    #[error("network error reaching upstream: {0}")]
    Network(String),

    #[error("no provider profile registered for model '{0}'")]
    NoProfile(String),

    #[error("unexpected upstream response: {0}")]
    Unknown(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Short stable name of the error kind, used as a metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Unauthorized(_) => "unauthorized",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::RateLimited(_) => "rate_limited",
            GatewayError::UpstreamServer(_) => "upstream_server",
            GatewayError::BadRequest(_) => "bad_request",
            GatewayError::Timeout(_) => "timeout",
            GatewayError::Network(_) => "network",
            GatewayError::NoProfile(_) => "no_profile",
            GatewayError::Unknown(_) => "unknown",
            GatewayError::Io(_) => "io",
            GatewayError::Config(_) => "config",
        }
    }

    /// HTTP status a given error kind surfaces as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::UpstreamServer(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::NoProfile(_)
            | GatewayError::Unknown(_)
            | GatewayError::Io(_)
            | GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// The public endpoint answers failures with a plain-text diagnostic body.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
