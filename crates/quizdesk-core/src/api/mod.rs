//! REST API client module for the quiz platform backend.
//!
//! Every backend call goes through `ApiClient`, which attaches the stored
//! bearer token to outgoing requests and hands authentication failures to an
//! injected `AuthFailureHandler` before returning the error to the caller.

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, AuthFailureHandler, UploadKind, API_PREFIX};
pub use endpoints::DashboardStats;
pub use error::{ApiError, ApiResult, INVALID_TOKEN_CODE, INVALID_TOKEN_MARKER};
