//! Upstream image source
//!
//! Fetches the canonical image for a status-code key from a fixed HTTP
//! endpoint (`https://http.cat` unless configured otherwise).

pub mod error;
pub mod fetcher;

pub use error::{FetchError, Result};
pub use fetcher::{ImageFetcher, DEFAULT_TIMEOUT, DEFAULT_UPSTREAM_URL};
