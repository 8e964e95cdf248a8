//! `userapi` - An in-memory user CRUD service
//!
//! This library provides the user store, the axum router exposing it over
//! HTTP with generated OpenAPI documentation, and the configuration and
//! logging used by the `userapi` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod store;
pub mod user;

pub use api::{router, AppState};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use store::UserStore;
pub use user::{NewUser, UpdateUser, User, UserId};
