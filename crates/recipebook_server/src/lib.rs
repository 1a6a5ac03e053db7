//! HTTP transport for the RecipeBook catalog.
//!
//! Thin layer: marshals requests into catalog calls and maps catalog error
//! kinds to status codes.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use router::build_router;
pub use server::RecipeBookServer;
