//! Core library for quizdesk.
//!
//! Everything the admin console needs that is not terminal rendering:
//!
//! - `api`: the HTTP client with its request/response interceptors and the
//!   typed endpoint methods for every backend resource
//! - `auth`: the token store backends and the session provider
//! - `routes`: the route table, the route guard and the navigation history
//! - `models`: backend records and the drafts submitted from forms
//! - `config`: build-time backend selection and the on-disk config file

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod routes;
pub mod utils;

pub use api::{ApiClient, ApiError, AuthFailureHandler};
pub use auth::{LoginError, Session, SessionProvider, SessionStatus, TokenStore};
pub use config::Config;
pub use routes::{Decision, History, Navigator, Route};
