// Inbound generation request model

/// Default edge length when the URL supplies no resolution segment.
pub const DEFAULT_DIMENSION: u32 = 1024;

/// A fully parsed generation request.
///
/// These four fields are the complete semantic identity of a generation: the
/// cache key is derived from them and nothing else, so identical requests
/// share one cached image no matter which model or provider serves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Prompt text. May be empty.
    pub prompt: String,

    /// Negative prompt text. Empty means "none supplied".
    pub negative_prompt: String,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: String::new(),
            width: DEFAULT_DIMENSION,
            height: DEFAULT_DIMENSION,
        }
    }
}

impl GenerationRequest {
    pub fn has_negative_prompt(&self) -> bool {
        !self.negative_prompt.is_empty()
    }

    /// Combined `WIDTHxHEIGHT` form, used by resolution-string endpoints and
    /// the request log line.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}
