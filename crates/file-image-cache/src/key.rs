//! Cache keys

use std::fmt;
use std::str::FromStr;

/// File extension used for every cached entry
const ENTRY_EXTENSION: &str = "jpg";

/// A validated cache key: exactly three ASCII decimal digits, e.g. `"404"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 3]);

/// Returned when a path segment is not a well-formed cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKey;

impl CacheKey {
    /// Validate the first `/`-delimited segment of a request path.
    ///
    /// `"/200"` and `"/200/anything"` both yield `200`; `"/"` and `"/abc"` do not.
    pub fn from_path(path: &str) -> Result<Self, InvalidKey> {
        let segment = path
            .strip_prefix('/')
            .unwrap_or(path)
            .split('/')
            .next()
            .unwrap_or_default();
        segment.parse()
    }

    pub fn as_str(&self) -> &str {
        // Only ever built from ASCII digits
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Name of the file backing this key inside the cache root
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.as_str(), ENTRY_EXTENSION)
    }
}

impl FromStr for CacheKey {
    type Err = InvalidKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            &[a, b, c] if [a, b, c].iter().all(u8::is_ascii_digit) => Ok(Self([a, b, c])),
            _ => Err(InvalidKey),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cache key must be exactly three decimal digits")
    }
}

impl std::error::Error for InvalidKey {}
