//! Error types for rule-reviewer-mcp.
//!
//! Protocol-level failures that the client should see (bad tool params,
//! unknown tool) are JSON-RPC error objects built in [`crate::mcp::protocol`].
//! The enums here cover everything else: failures that are logged and
//! either skip a single message or stop the server.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },
}

/// Errors raised while routing a message to a handler.
///
/// None of these reach the client. The server loop logs them and moves on
/// to the next line without writing a response.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The method name is not one the server handles.
    #[error("unknown method: {method}")]
    UnknownMethod {
        /// The method name as received (may be empty).
        method: String,
    },

    /// A handler result could not be encoded as JSON.
    #[error("failed to encode {what} result")]
    Encode {
        /// Which result was being encoded.
        what: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the line transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The outgoing message could not be serialised. Nothing was written.
    #[error("failed to serialise outgoing message")]
    Encode(#[source] serde_json::Error),

    /// Reading from or writing to the underlying stream failed.
    #[error("transport I/O error")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn read_error_display_includes_cause() {
        let error = ConfigError::ReadError {
            path: PathBuf::from("/etc/rr.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let msg = error.to_string();
        assert!(msg.contains("/etc/rr.json"));
        assert!(msg.ends_with("permission denied"));
    }

    #[test]
    fn unknown_method_display() {
        let error = DispatchError::UnknownMethod {
            method: "resources/list".to_string(),
        };
        assert_eq!(error.to_string(), "unknown method: resources/list");
    }

    #[test]
    fn transport_io_from() {
        let error: TransportError = std::io::Error::other("pipe closed").into();
        assert!(matches!(error, TransportError::Io(_)));
    }
}
