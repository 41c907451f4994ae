//! Error taxonomy for pagination sessions.

use thiserror::Error;

/// Boxed source error carried by [`TransportError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a [`Transport`](crate::Transport) operation.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct TransportError {
    /// Transport operation that failed (e.g. `edit_message`).
    pub operation: &'static str,
    /// Underlying platform error.
    #[source]
    pub source: BoxError,
}

impl TransportError {
    /// Wrap a platform error raised while performing `operation`.
    pub fn new(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }
}

/// Errors raised by pagination configuration, dispatch and lifecycle calls.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// Malformed caller input, e.g. an empty caption or a timeout below the floor.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An index outside `0..page_count`.
    #[error("page index {index} is out of range for {page_count} page(s)")]
    OutOfRange { index: usize, page_count: usize },

    /// Operation attempted before start, after close, or on double start.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// The current index resolved to no page.
    #[error("no page at index {index}")]
    NotFound { index: usize },

    /// The underlying transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl PaginationError {
    /// Whether this error came from the transport rather than from the session.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result alias used across the crate.
pub type Result<T, E = PaginationError> = std::result::Result<T, E>;
