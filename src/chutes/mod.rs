// Chutes API client module

mod client;

pub use client::ChutesClient;
