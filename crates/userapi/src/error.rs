//! Error types for userapi.
//!
//! This module defines the library error type shared by the store, the
//! configuration layer, and the server. HTTP-facing errors live in
//! [`crate::api::ApiError`], which converts from these.

use std::net::SocketAddr;

use thiserror::Error;

use crate::user::UserId;

/// The main error type for userapi operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// No user holds the requested id.
    #[error("user {id} not found")]
    UserNotFound {
        /// The id that was looked up.
        id: UserId,
    },

    /// An update would give a record an id already held by another record.
    #[error("user id {id} is already in use")]
    IdConflict {
        /// The id that collided.
        id: UserId,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that couldn't be bound.
        addr: SocketAddr,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// Socket or file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for userapi operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error means the requested user does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. })
    }

    /// Check if this error is an id collision.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::IdConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UserNotFound { id: 42 };
        assert_eq!(err.to_string(), "user 42 not found");

        let err = Error::IdConflict { id: 2 };
        assert_eq!(err.to_string(), "user id 2 is already in use");
    }

    #[test]
    fn test_error_is_not_found() {
        assert!(Error::UserNotFound { id: 1 }.is_not_found());
        assert!(!Error::internal("test").is_not_found());
    }

    #[test]
    fn test_error_is_conflict() {
        assert!(Error::IdConflict { id: 1 }.is_conflict());
        assert!(!Error::UserNotFound { id: 1 }.is_conflict());
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::config_validation("port must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: port must be greater than 0"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("address in use"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_figment_error() {
        let err: Error = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(err, Error::ConfigLoad(_)));
        assert!(err.to_string().contains("bad value"));
    }

    #[test]
    fn test_bind_error_display() {
        let err = Error::Bind {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:8080"));
        assert!(msg.contains("in use"));
    }
}
