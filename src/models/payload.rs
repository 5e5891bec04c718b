// Chutes generation API wire types

use serde::Serialize;

/// Inference step count sent to the unified endpoint.
pub const DEFAULT_STEPS: u32 = 20;

/// Guidance scale sent to the unified endpoint.
pub const DEFAULT_GUIDANCE: f32 = 7.5;

/// JSON body of an upstream generation call.
///
/// A single struct covers both provider shapes. Fields the active profile
/// does not support stay `None` and are skipped during serialization, so a
/// strict native endpoint never sees parameters it would reject.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPayload {
    /// Target model. Only the unified endpoint routes by this field; native
    /// endpoints encode the model in their URL instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub prompt: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Combined `"WIDTHxHEIGHT"` form used by some native endpoints in place
    /// of separate width/height fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_inference_steps: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance_scale: Option<f32>,
}
