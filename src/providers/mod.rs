//! Provider profiles and model resolution.
//!
//! Every backend the gateway can call is described by a [`ProviderProfile`]:
//! the URL shape and the payload fields the backend accepts. Profiles come
//! from a built-in table or are registered by the operator, optionally
//! inferred from a pasted example request.

pub mod infer;
pub mod profile;
pub mod registry;

pub use infer::{infer_profile, templatize_url, InferredProfile};
pub use profile::{
    ProviderKind, ProviderProfile, ResolutionMode, MODEL_PLACEHOLDER, NATIVE_URL_TEMPLATE,
    UNIFIED_ENDPOINT,
};
pub use registry::ProviderRegistry;

/// The currently active (model, profile, credential) tuple.
///
/// Exactly one binding serves a running gateway instance. It is assembled
/// from read-only configuration and registry state per request and never
/// mutated while the server runs.
#[derive(Debug, Clone)]
pub struct ModelBinding {
    pub model_name: String,
    pub profile: ProviderProfile,
    pub api_key: String,
}
