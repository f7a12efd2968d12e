//! Authentication module for managing the console session.
//!
//! This module provides:
//! - `TokenStore`: durable storage for the single bearer token (file,
//!   OS keychain, or memory)
//! - `SessionProvider`: the session state holder with login, logout and
//!   identity resolution
//!
//! The token is never validated locally; the backend decides, and a rejected
//! token ends the session through the same path as an explicit logout.

pub mod session;
pub mod token_store;

pub use session::{LoginError, Session, SessionProvider, SessionStatus};
pub use token_store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
