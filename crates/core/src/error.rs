//! Error types for skbn-core

use thiserror::Error;

/// Result type alias using the crate's error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by path parsing, configuration and the transfer operations
#[derive(Debug, Error)]
pub enum Error {
    /// The logical path failed structural validation
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A session could not be established after exhausting retries
    #[error("Failed to connect to object storage in region '{region}': {source}")]
    Connection { region: String, source: Box<Error> },

    /// Listing a prefix failed after exhausting retries
    #[error("Failed to list '{path}': {source}")]
    List { path: String, source: Box<Error> },

    /// Downloading an object failed after exhausting retries
    #[error("Failed to download '{path}': {source}")]
    Download { path: String, source: Box<Error> },

    /// Uploading an object failed after exhausting retries
    #[error("Failed to upload '{from}' to '{path}': {source}")]
    Upload {
        path: String,
        from: String,
        source: Box<Error>,
    },

    /// Transport or service failure reported by an object store
    #[error("Network error: {0}")]
    Network(String),

    /// The object body did not match its declared content length
    #[error("Content length mismatch: expected {expected} bytes, received {received}")]
    ContentLengthMismatch { expected: u64, received: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether retrying the failed call could succeed
    pub fn is_retryable(&self) -> bool {
        crate::retry::is_retryable_error(self)
    }

    /// The innermost error for operation-level failures
    ///
    /// Returns `self` for errors that do not wrap another one.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Connection { source, .. }
            | Error::List { source, .. }
            | Error::Download { source, .. }
            | Error::Upload { source, .. } => source.root_cause(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_errors_name_the_path() {
        let err = Error::Download {
            path: "bucket/dir/file.bin".to_string(),
            source: Box::new(Error::Network("connection reset".to_string())),
        };
        let msg = err.to_string();
        assert!(msg.contains("download"));
        assert!(msg.contains("bucket/dir/file.bin"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_root_cause() {
        let err = Error::List {
            path: "bucket/prefix".to_string(),
            source: Box::new(Error::Network("503 Service Unavailable".to_string())),
        };
        assert!(matches!(err.root_cause(), Error::Network(_)));

        let plain = Error::InvalidPath("empty".to_string());
        assert!(matches!(plain.root_cause(), Error::InvalidPath(_)));
    }
}
