//! File-based image cache keyed by three-digit status codes
//!
//! Each entry lives in its own `<key>.jpg` file under a single cache root.
//! The directory listing is the only index; there is no in-memory layer.

mod cache;
mod error;
mod key;

pub use cache::ImageCache;
pub use error::{CacheError, Result};
pub use key::{CacheKey, InvalidKey};
