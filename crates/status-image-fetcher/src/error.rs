//! Error types for the upstream fetcher

use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    /// The HTTP client could not be built
    Client(Box<reqwest::Error>),
    /// Transport failure or timeout
    Http(Box<reqwest::Error>),
    /// Upstream answered with a non-success status
    Status(u16),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Client(err) => write!(f, "HTTP client error: {}", err),
            FetchError::Http(err) => write!(f, "HTTP error: {}", err),
            FetchError::Status(status) => write!(f, "Upstream returned status {}", status),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Client(err) | FetchError::Http(err) => Some(err.as_ref()),
            FetchError::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
