// Payload translation - generation request into a provider-specific call

use crate::models::payload::{GenerationPayload, DEFAULT_GUIDANCE, DEFAULT_STEPS};
use crate::models::request::GenerationRequest;
use crate::providers::{ModelBinding, ProviderKind, ResolutionMode};

/// Build the upstream URL and JSON payload for a request under the active
/// binding. The binding's profile alone decides which fields are emitted.
pub fn build_payload(
    request: &GenerationRequest,
    binding: &ModelBinding,
) -> (String, GenerationPayload) {
    let url = binding.profile.endpoint_for(&binding.model_name);

    let negative_prompt = if binding.profile.supports_negative_prompt
        && request.has_negative_prompt()
    {
        Some(request.negative_prompt.clone())
    } else {
        None
    };

    let payload = match binding.profile.kind {
        ProviderKind::Unified => GenerationPayload {
            // The unified endpoint routes by the model field and always takes
            // separate width/height plus fixed generation parameters.
            model: Some(binding.model_name.clone()),
            prompt: request.prompt.clone(),
            negative_prompt,
            width: Some(request.width),
            height: Some(request.height),
            resolution: None,
            num_inference_steps: Some(DEFAULT_STEPS),
            guidance_scale: Some(DEFAULT_GUIDANCE),
        },
        ProviderKind::Native => {
            let (width, height, resolution) = match binding.profile.resolution_mode {
                ResolutionMode::None => (None, None, None),
                ResolutionMode::WidthHeight => (Some(request.width), Some(request.height), None),
                ResolutionMode::ResolutionString => (None, None, Some(request.resolution())),
            };

            GenerationPayload {
                model: None,
                prompt: request.prompt.clone(),
                negative_prompt,
                width,
                height,
                resolution,
                num_inference_steps: None,
                guidance_scale: None,
            }
        }
    };

    (url, payload)
}
