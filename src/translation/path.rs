// Path translation - URL segments into a generation request

use crate::models::request::GenerationRequest;
use once_cell::sync::Lazy;
use regex::Regex;

/// `<digits>x<digits>` with a case-insensitive separator.
static RESOLUTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)[xX](\d+)$").unwrap());

/// Parse an already percent-decoded `/prompt/...` tail into a request.
///
/// Segment 0 is always the prompt, even when empty. Every later segment is
/// classified on its own, so resolution and negative prompt may appear in
/// either order:
/// - `<digits>x<digits>` overrides the default 1024x1024;
/// - `-`, empty and whitespace-only segments mean "not supplied";
/// - the first other segment becomes the negative prompt, later candidates
///   are ignored.
///
/// Parsing never fails. The URL shape is the gateway's only public API, so
/// partial, legacy or malformed links must still resolve to a usable
/// request: values that do not parse simply leave the defaults in place.
pub fn parse_prompt_path(path: &str) -> GenerationRequest {
    let mut segments = path.split('/');

    let mut request = GenerationRequest {
        prompt: segments.next().unwrap_or_default().to_string(),
        ..GenerationRequest::default()
    };

    for segment in segments {
        let trimmed = segment.trim();
        if trimmed.is_empty() || trimmed == "-" {
            continue;
        }

        if let Some(captures) = RESOLUTION.captures(trimmed) {
            // A resolution-shaped segment is spent here even when its numbers
            // are unusable (zero or larger than u32), never reinterpreted as
            // a negative prompt.
            if let (Ok(width), Ok(height)) =
                (captures[1].parse::<u32>(), captures[2].parse::<u32>())
            {
                if width > 0 && height > 0 {
                    request.width = width;
                    request.height = height;
                }
            }
            continue;
        }

        if request.negative_prompt.is_empty() {
            request.negative_prompt = segment.to_string();
        }
    }

    request
}
