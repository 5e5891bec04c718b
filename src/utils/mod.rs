//! Cross-cutting helpers for the prompt2img gateway.
//!
//! - `logging`: tracing initialization and credential masking.

pub mod logging;
