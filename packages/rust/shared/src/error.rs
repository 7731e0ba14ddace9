//! Error types for TextRelay.
//!
//! Library crates use [`PipelineError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all TextRelay operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The webhook endpoint is empty or unconfigured. Raised before any
    /// network activity or processing-state mutation.
    #[error("webhook endpoint is not configured")]
    MissingEndpoint,

    /// The webhook returned a non-success HTTP status. The response body is
    /// not interpreted.
    #[error("webhook request failed with status {status}")]
    RemoteCallFailed { status: u16 },

    /// A successful webhook response contained no extractable text under any
    /// of the known response shapes.
    #[error("webhook response contained no usable text")]
    InvalidResponseFormat,

    /// Lower-level network/transport failure (DNS, connection reset,
    /// malformed JSON body).
    #[error("transport error: {0}")]
    Transport(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Create a transport error from any displayable message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
