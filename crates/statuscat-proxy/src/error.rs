//! Error types for the statuscat proxy

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Fatal errors raised while starting or running the server
#[derive(Debug)]
pub enum ProxyError {
    Cache(file_image_cache::CacheError),
    Fetcher(status_image_fetcher::FetchError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Cache(err) => write!(f, "Cache error: {}", err),
            ProxyError::Fetcher(err) => write!(f, "Upstream error: {}", err),
            ProxyError::Io(err) => write!(f, "IO error: {}", err),
            ProxyError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::Cache(err) => Some(err),
            ProxyError::Fetcher(err) => Some(err),
            ProxyError::Io(err) => Some(err.as_ref()),
            ProxyError::Config(_) => None,
        }
    }
}

impl From<file_image_cache::CacheError> for ProxyError {
    fn from(err: file_image_cache::CacheError) -> Self {
        ProxyError::Cache(err)
    }
}

impl From<status_image_fetcher::FetchError> for ProxyError {
    fn from(err: status_image_fetcher::FetchError) -> Self {
        ProxyError::Fetcher(err)
    }
}

impl From<std::io::Error> for ProxyError {
    fn from(err: std::io::Error) -> Self {
        ProxyError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ProxyError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ProxyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Per-request failure, rendered as a plain-text HTTP response
#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

impl From<file_image_cache::InvalidKey> for ApiError {
    fn from(_: file_image_cache::InvalidKey) -> Self {
        ApiError::NotFound
    }
}
