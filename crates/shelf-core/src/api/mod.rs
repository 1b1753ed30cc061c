//! HTTP client for the remote catalog admin API.

mod client;
mod error;

pub use client::{CatalogClient, USER_AGENT};
pub use error::{ApiError, ApiErrorKind, ApiResult};
