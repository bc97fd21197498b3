//! Error types for Horizon Quill core.

use std::fmt;

/// The main error type for Horizon Quill core operations.
#[derive(Debug)]
pub enum QuillError {
    /// Event-queue related error.
    Queue(QueueError),
}

impl fmt::Display for QuillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queue(err) => write!(f, "Event queue error: {err}"),
        }
    }
}

impl std::error::Error for QuillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Queue(err) => Some(err),
        }
    }
}

impl From<QueueError> for QuillError {
    fn from(err: QueueError) -> Self {
        Self::Queue(err)
    }
}

/// Event-queue errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// The receiving side of the queue has been dropped.
    Closed,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "The event queue receiver has been dropped"),
        }
    }
}

impl std::error::Error for QueueError {}

/// A specialized Result type for Horizon Quill core operations.
pub type Result<T> = std::result::Result<T, QuillError>;
