//! Error types for chit
//!
//! Provides a unified error type used across all chit crates.

use std::path::PathBuf;

use chit_protocol::CodecError;

/// Main error type for chit operations
#[derive(Debug, thiserror::Error)]
pub enum ChitError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Connection Errors ===

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChitError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using ChitError
pub type Result<T> = std::result::Result<T, ChitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err = ChitError::Io(io_err);
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_error_display_connection() {
        let err = ChitError::connection("refused");
        assert!(matches!(err, ChitError::Connection(_)));
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_error_display_file_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = ChitError::FileWrite {
            path: PathBuf::from("/var/log/chit/chit.log"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write file"));
        assert!(msg.contains("/var/log/chit/chit.log"));
    }

    #[test]
    fn test_error_display_codec() {
        let err: ChitError = CodecError::FrameTooLarge { max: 16 }.into();
        assert_eq!(err.to_string(), "Codec error: Frame too large (max 16 bytes)");
    }

    #[test]
    fn test_helpers() {
        assert_eq!(
            ChitError::config("missing username").to_string(),
            "Configuration error: missing username"
        );
        assert_eq!(
            ChitError::internal("invariant violated").to_string(),
            "Internal error: invariant violated"
        );
    }

    #[test]
    fn test_from_io_error_preserves_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err: ChitError = io_err.into();
        if let ChitError::Io(inner) = err {
            assert_eq!(inner.kind(), std::io::ErrorKind::ConnectionReset);
        } else {
            panic!("Expected Io variant");
        }
    }
}
