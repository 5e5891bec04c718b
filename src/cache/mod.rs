// Image cache module

pub mod store;

pub use store::{CacheKey, ImageCache};
