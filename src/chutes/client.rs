// Chutes generation API client

use crate::config::ChutesConfig;
use crate::error::{GatewayError, Result};
use crate::models::request::GenerationRequest;
use crate::providers::ModelBinding;
use crate::translation::build_payload;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error};

/// Longest upstream body fragment carried inside an error, so a diagnostic
/// never balloons into a full HTML error page.
const SNIPPET_LEN: usize = 200;

/// Client for Chutes generation endpoints.
///
/// One pooled HTTP client serves every profile; the target URL and payload
/// shape come from the binding on each call. The client performs no retries:
/// every upstream outcome is classified exactly once and handed back.
pub struct ChutesClient {
    http_client: Client,
    timeout_seconds: u64,
}

impl ChutesClient {
    /// Create a client with a bounded total timeout and connection pooling.
    pub fn new(config: &ChutesConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Request one image from the backend selected by the binding.
    ///
    /// Returns the raw image bytes on HTTP 200. Any other status, and any
    /// transport failure, maps to a [`GatewayError`] kind by the fixed table
    /// below; retry policy, if any, belongs to the caller.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        binding: &ModelBinding,
    ) -> Result<Bytes> {
        let (url, payload) = build_payload(request, binding);
        debug!("Calling {} for model {}", url, binding.model_name);

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", binding.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if status == StatusCode::OK {
            return response
                .bytes()
                .await
                .map_err(|e| self.classify_transport(e));
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            "Upstream error for model {}: HTTP {} - {}",
            binding.model_name,
            status,
            snippet(&body)
        );
        Err(map_status(status, &body, &binding.model_name))
    }

    /// Connection-level failures become Timeout or Network; nothing else.
    fn classify_transport(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(self.timeout_seconds)
        } else {
            GatewayError::Network(e.to_string())
        }
    }
}

/// Fixed status → error mapping shared by every provider profile.
fn map_status(status: StatusCode, body: &str, model: &str) -> GatewayError {
    let detail = {
        let s = snippet(body);
        if s.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("no response body")
                .to_string()
        } else {
            s
        }
    };

    match status.as_u16() {
        400 => GatewayError::BadRequest(detail),
        401 => GatewayError::Unauthorized(detail),
        404 => GatewayError::NotFound(model.to_string()),
        429 => GatewayError::RateLimited(detail),
        500 => GatewayError::UpstreamServer(detail),
        code => GatewayError::Unknown(format!("HTTP {code}: {detail}")),
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(SNIPPET_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_table() {
        assert!(matches!(
            map_status(StatusCode::BAD_REQUEST, "bad payload", "m"),
            GatewayError::BadRequest(_)
        ));
        assert!(matches!(
            map_status(StatusCode::UNAUTHORIZED, "", "m"),
            GatewayError::Unauthorized(_)
        ));
        assert!(matches!(
            map_status(StatusCode::NOT_FOUND, "", "m"),
            GatewayError::NotFound(_)
        ));
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, "quota", "m"),
            GatewayError::RateLimited(_)
        ));
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, "", "m"),
            GatewayError::UpstreamServer(_)
        ));
        assert!(matches!(
            map_status(StatusCode::IM_A_TEAPOT, "odd", "m"),
            GatewayError::Unknown(_)
        ));
    }

    #[test]
    fn test_not_found_names_the_model() {
        let err = map_status(StatusCode::NOT_FOUND, "", "z-image-turbo");
        assert!(err.to_string().contains("z-image-turbo"));
    }

    #[test]
    fn test_unknown_status_truncates_body() {
        let body = "x".repeat(5000);
        let err = map_status(StatusCode::IM_A_TEAPOT, &body, "m");
        let msg = err.to_string();
        assert!(msg.contains("HTTP 418"));
        assert!(msg.len() < 300, "body snippet is truncated: {}", msg.len());
    }

    #[test]
    fn test_empty_body_falls_back_to_reason_phrase() {
        let err = map_status(StatusCode::TOO_MANY_REQUESTS, "", "m");
        assert!(err.to_string().contains("Too Many Requests"));
    }
}
