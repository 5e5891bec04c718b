// prompt2img - Caching URL-to-image gateway for Chutes AI backends

pub mod cache;
pub mod chutes;
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod providers;
pub mod server;
pub mod translation;
pub mod utils;
