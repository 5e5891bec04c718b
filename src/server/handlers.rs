// HTTP request handlers

use super::routes::AppState;
use crate::cache::ImageCache;
use crate::config;
use crate::error::Result;
use crate::metrics;
use crate::models::request::GenerationRequest;
use crate::translation::parse_prompt_path;
use crate::utils::logging::mask_key;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{error, info};

/// Handler for the public `/prompt/*params` endpoint.
///
/// Per-request state machine: parse (never fails) → cache check → on miss,
/// generate through the active binding → cache write → respond. Failures
/// surface with the fixed status mapping and a plain-text body; no partial
/// cache write happens on a failure path.
pub async fn prompt_handler(
    State(state): State<AppState>,
    Path(params): Path<String>,
) -> Response {
    let started = Instant::now();
    let request = parse_prompt_path(&params);

    info!(
        prompt = %request.prompt,
        negative_prompt = %request.negative_prompt,
        resolution = %request.resolution(),
        "Received generation request"
    );

    let response = match serve_prompt(&state, &request).await {
        Ok(bytes) => image_response(bytes),
        Err(e) => {
            error!(
                prompt = %request.prompt,
                resolution = %request.resolution(),
                error = %e,
                "Request failed"
            );
            e.into_response()
        }
    };

    metrics::record_request(
        "/prompt",
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

async fn serve_prompt(state: &AppState, request: &GenerationRequest) -> Result<Bytes> {
    let key = ImageCache::key_for(request);

    if let Some(bytes) = state.cache.get(&key).await? {
        metrics::record_cache_hit();
        info!(key = %key, "Cache hit, serving stored image");
        return Ok(bytes);
    }

    metrics::record_cache_miss();
    info!(key = %key, "Cache miss, generating");

    let binding = state.binding()?;
    let generation_started = Instant::now();
    let result = state.client.generate(request, &binding).await;
    let elapsed = generation_started.elapsed().as_secs_f64();

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics::record_upstream_call(&binding.model_name, outcome, elapsed);

    let bytes = result?;
    info!(
        model = %binding.model_name,
        "Generated in {:.1}s",
        elapsed
    );

    state.cache.put(&key, &bytes).await?;
    metrics::record_cache_store();
    metrics::update_cache_entries(state.cache.entry_count());
    info!(file = %key.file_name(), "Stored in cache");

    Ok(bytes)
}

fn image_response(bytes: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check credential shape
    let key = &state.config.chutes.api_key;
    let key_check = if key.is_empty() {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: "API key not configured".to_string(),
        }
    } else if !config::is_valid_api_key(key) {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: format!("API key {} has an unrecognized shape", mask_key(key)),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("API key {}", mask_key(key)),
        }
    };
    checks.insert("api_key".to_string(), key_check);

    // Check that the active model resolves to a profile
    let model_check = match state.binding() {
        Ok(binding) => HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "Model {} ({:?} profile)",
                binding.model_name, binding.profile.kind
            ),
        },
        Err(e) => {
            overall_status = HealthStatus::Unhealthy;
            HealthCheck {
                status: "error".to_string(),
                message: e.to_string(),
            }
        }
    };
    checks.insert("model_binding".to_string(), model_check);

    // Check cache directory
    let cache_check = match state.cache.ensure_dir() {
        Ok(()) => HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "{} ({} images)",
                state.cache.dir().display(),
                state.cache.entry_count()
            ),
        },
        Err(e) => {
            overall_status = HealthStatus::Unhealthy;
            HealthCheck {
                status: "error".to_string(),
                message: format!("Cache directory unavailable: {e}"),
            }
        }
    };
    checks.insert("cache".to_string(), cache_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for the Prometheus text exposition endpoint.
pub async fn metrics_handler() -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
        .into_response()
}
