//! statuscat proxy library
//!
//! Provides the router, handlers and configuration for the status-code image
//! caching proxy.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::Config;
pub use error::{ApiError, ProxyError, Result};
pub use server::{create_router, start_server, ServerState, SharedState};
