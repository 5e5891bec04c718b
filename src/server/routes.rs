// HTTP routes configuration

use super::handlers::{health_handler, metrics_handler, prompt_handler};
use super::middleware::request_id_layers;
use crate::cache::ImageCache;
use crate::chutes::ChutesClient;
use crate::config::AppConfig;
use crate::error::{GatewayError, Result};
use crate::providers::{ModelBinding, ProviderRegistry};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub registry: Arc<ProviderRegistry>,
    pub cache: Arc<ImageCache>,
    pub client: Arc<ChutesClient>,
}

impl AppState {
    /// Materialize the active model binding from read-only state.
    ///
    /// The model name and credential are fixed for the process lifetime; the
    /// profile is resolved through the registry so it stays the single
    /// source of profile truth. An unresolvable model is a configuration
    /// invariant violation, not an upstream failure.
    pub fn binding(&self) -> Result<ModelBinding> {
        let model = &self.config.chutes.model;
        let profile = self
            .registry
            .lookup(model)
            .cloned()
            .ok_or_else(|| GatewayError::NoProfile(model.clone()))?;

        Ok(ModelBinding {
            model_name: model.clone(),
            profile,
            api_key: self.config.chutes.api_key.clone(),
        })
    }
}

pub fn create_router(
    config: AppConfig,
    registry: ProviderRegistry,
    cache: ImageCache,
    client: ChutesClient,
) -> Router {
    let state = AppState {
        config,
        registry: Arc::new(registry),
        cache: Arc::new(cache),
        client: Arc::new(client),
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    Router::new()
        .route("/prompt/*params", get(prompt_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state)
}
