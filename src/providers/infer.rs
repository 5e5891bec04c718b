// Best-effort profile inference from a pasted example request

use crate::providers::profile::{
    ProviderProfile, ResolutionMode, MODEL_PLACEHOLDER, NATIVE_URL_TEMPLATE,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches http(s) URLs whose path ends in a generate-style segment.
static GENERATE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'`]+/generate\b"#).unwrap());

/// A profile produced by [`infer_profile`].
///
/// The wrapper marks the profile as heuristic output: the operator is
/// expected to review and override fields before it is registered, and
/// upstream errors caused by a wrong guess surface as-is instead of
/// triggering further inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredProfile {
    pub profile: ProviderProfile,
}

impl InferredProfile {
    /// Accept the inferred fields unchanged.
    pub fn into_profile(self) -> ProviderProfile {
        self.profile
    }
}

/// Inspect a pasted example request and guess how to call its backend.
///
/// The unified endpoint hostname anywhere in the example selects the unified
/// convention wholesale. Any other generate-style URL selects a native
/// profile using that URL as the template; field support is then inferred
/// from substring presence, defaulting to "not supported". The guess may not
/// match the true backend contract.
pub fn infer_profile(example: &str) -> InferredProfile {
    if example.contains("image.chutes.ai") {
        return InferredProfile {
            profile: ProviderProfile::unified(),
        };
    }

    let mut profile = ProviderProfile::native();
    if let Some(url) = GENERATE_URL.find(example) {
        profile.url_template = url.as_str().to_string();
    }

    profile.supports_negative_prompt = example.contains("negative_prompt");

    profile.resolution_mode = if example.contains("width") && example.contains("height") {
        ResolutionMode::WidthHeight
    } else if example.contains("resolution") {
        ResolutionMode::ResolutionString
    } else {
        ResolutionMode::None
    };

    InferredProfile { profile }
}

/// Replace the model name inside an inferred URL with the `{model}`
/// placeholder, so the stored template survives a later model rename.
/// Returns the URL unchanged when the name does not occur in it.
pub fn templatize_url(url: &str, model: &str) -> String {
    if model.is_empty() || !url.contains(model) {
        return url.to_string();
    }
    url.replacen(model, MODEL_PLACEHOLDER, 1)
}
