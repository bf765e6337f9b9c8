//! Request dispatch and the GET/PUT/DELETE handlers

use crate::error::ApiError;
use crate::server::{ServerState, SharedState};
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use file_image_cache::{CacheError, CacheKey};
use tracing::{debug, warn};

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Where an image response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    fn header_value(self) -> HeaderValue {
        match self {
            CacheStatus::Hit => HeaderValue::from_static("HIT"),
            CacheStatus::Miss => HeaderValue::from_static("MISS"),
        }
    }
}

/// Route a request: validate the key first, then dispatch on method
pub async fn dispatch(State(state): State<SharedState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let key = match CacheKey::from_path(parts.uri.path()) {
        Ok(key) => key,
        Err(_) => {
            debug!(path = %parts.uri.path(), "Rejected malformed key");
            return ApiError::NotFound.into_response();
        }
    };

    let result = match parts.method {
        Method::GET => get_image(&state, &key).await,
        Method::PUT => match read_body(body).await {
            Ok(body) => put_image(&state, &key, &body).await,
            Err(e) => Err(e),
        },
        Method::DELETE => delete_image(&state, &key).await,
        _ => Err(ApiError::MethodNotAllowed),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

async fn read_body(body: Body) -> Result<Bytes, ApiError> {
    axum::body::to_bytes(body, usize::MAX).await.map_err(|e| {
        warn!(error = %e, "Failed to read request body");
        ApiError::BadRequest
    })
}

/// Serve from cache, falling back to the upstream and populating the cache
pub async fn get_image(state: &ServerState, key: &CacheKey) -> Result<Response, ApiError> {
    match state.cache.read(key).await {
        Ok(data) => return Ok(image_response(data, CacheStatus::Hit)),
        Err(CacheError::NotFound) => {}
        Err(e) => return Err(ApiError::Internal(format!("reading {}: {}", key, e))),
    }

    let data = state.fetcher.fetch(key).await.map_err(|e| {
        warn!(key = %key, error = %e, "Failed to fetch image from upstream");
        ApiError::NotFound
    })?;

    // The client still gets the image if it could not be persisted
    if let Err(e) = state.cache.write(key, &data).await {
        warn!(key = %key, error = %e, "Failed to cache image");
    }

    Ok(image_response(data, CacheStatus::Miss))
}

/// Store the request body as the entry for `key`
pub async fn put_image(
    state: &ServerState,
    key: &CacheKey,
    body: &[u8],
) -> Result<Response, ApiError> {
    state
        .cache
        .write(key, body)
        .await
        .map_err(|e| ApiError::Internal(format!("writing {}: {}", key, e)))?;

    Ok((StatusCode::CREATED, "Created").into_response())
}

/// Remove the entry for `key`
pub async fn delete_image(state: &ServerState, key: &CacheKey) -> Result<Response, ApiError> {
    match state.cache.delete(key).await {
        Ok(()) => Ok((StatusCode::OK, "Deleted").into_response()),
        Err(CacheError::NotFound) => Err(ApiError::NotFound),
        Err(e) => Err(ApiError::Internal(format!("deleting {}: {}", key, e))),
    }
}

fn image_response(data: Vec<u8>, cache_status: CacheStatus) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg")),
            (X_CACHE, cache_status.header_value()),
        ],
        data,
    )
        .into_response()
}
