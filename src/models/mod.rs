//! Data models shared across the gateway.
//!
//! - `request`: the parsed inbound generation request (cache identity).
//! - `payload`: the JSON body shapes sent to Chutes generation endpoints.

pub mod payload;
pub mod request;

pub use payload::{GenerationPayload, DEFAULT_GUIDANCE, DEFAULT_STEPS};
pub use request::{GenerationRequest, DEFAULT_DIMENSION};
