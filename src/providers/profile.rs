// Provider profile definitions

use serde::{Deserialize, Serialize};

/// Shared generation endpoint for third-party models hosted behind the
/// unified Chutes API.
pub const UNIFIED_ENDPOINT: &str = "https://image.chutes.ai/generate";

/// URL template for models served from their own per-model subdomain.
pub const NATIVE_URL_TEMPLATE: &str = "https://chutes-{model}.chutes.ai/generate";

/// Placeholder substituted with the model name in native URL templates.
pub const MODEL_PLACEHOLDER: &str = "{model}";

/// Which calling convention a backend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// One shared endpoint; the request body carries a `model` field.
    Unified,
    /// A per-model endpoint URL with a narrower, model-specific payload.
    Native,
}

/// How a backend expects image dimensions, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMode {
    /// The endpoint takes no size parameters.
    None,
    /// Separate numeric `width` and `height` fields.
    WidthHeight,
    /// One combined `"WIDTHxHEIGHT"` string field.
    ResolutionString,
}

/// Everything needed to call one backend's generation API.
///
/// A profile fully determines how an upstream payload is built from a request
/// and a model name; nothing else in the gateway special-cases a model.
/// Profiles are only ever replaced wholesale, never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    pub kind: ProviderKind,

    /// Endpoint URL; may contain the `{model}` placeholder.
    pub url_template: String,

    pub supports_negative_prompt: bool,

    pub resolution_mode: ResolutionMode,
}

impl ProviderProfile {
    /// Profile for the shared unified endpoint. Negative prompts and separate
    /// width/height fields are supported there by convention.
    pub fn unified() -> Self {
        Self {
            kind: ProviderKind::Unified,
            url_template: UNIFIED_ENDPOINT.to_string(),
            supports_negative_prompt: true,
            resolution_mode: ResolutionMode::WidthHeight,
        }
    }

    /// Strict default for native Chutes models: prompt only, dimensions
    /// chosen by the backend.
    pub fn native() -> Self {
        Self {
            kind: ProviderKind::Native,
            url_template: NATIVE_URL_TEMPLATE.to_string(),
            supports_negative_prompt: false,
            resolution_mode: ResolutionMode::None,
        }
    }

    /// Expand the URL template for a concrete model. A template without the
    /// placeholder is used verbatim.
    pub fn endpoint_for(&self, model: &str) -> String {
        if self.url_template.contains(MODEL_PLACEHOLDER) {
            self.url_template.replace(MODEL_PLACEHOLDER, model)
        } else {
            self.url_template.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_substitution() {
        let profile = ProviderProfile::native();
        assert_eq!(
            profile.endpoint_for("z-image-turbo"),
            "https://chutes-z-image-turbo.chutes.ai/generate"
        );
    }

    #[test]
    fn test_endpoint_verbatim_without_placeholder() {
        let profile = ProviderProfile {
            url_template: "https://example.chutes.ai/v2/generate".to_string(),
            ..ProviderProfile::native()
        };
        assert_eq!(
            profile.endpoint_for("anything"),
            "https://example.chutes.ai/v2/generate"
        );
    }

    #[test]
    fn test_unified_conventions() {
        let profile = ProviderProfile::unified();
        assert_eq!(profile.kind, ProviderKind::Unified);
        assert!(profile.supports_negative_prompt);
        assert_eq!(profile.resolution_mode, ResolutionMode::WidthHeight);
        assert_eq!(profile.endpoint_for("any"), UNIFIED_ENDPOINT);
    }
}
