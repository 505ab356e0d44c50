//! Errors surfaced by handles.

use thiserror::Error;

/// Errors that can occur while driving a handle.
///
/// `E` is the error type of the producer being driven. It is passed through
/// unchanged in the `Producer` variant.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IterError<E> {
    /// `current()` was read without a valid element: before the first
    /// successful advance, after exhaustion, after a failure, or after
    /// disposal.
    #[error("enumerator is in an invalid state")]
    InvalidState,

    /// The ambient or the owned cancellation signal fired before or during
    /// an advance.
    #[error("iteration was cancelled")]
    Cancelled,

    /// The producer's step logic failed.
    #[error("producer failed: {0}")]
    Producer(#[source] E),
}

impl<E> IterError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, IterError::Cancelled)
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, IterError::InvalidState)
    }

    /// Returns the producer's own error, if that is what this is.
    pub fn into_producer(self) -> Option<E> {
        match self {
            IterError::Producer(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for handle operations.
pub type IterResult<T, E> = Result<T, IterError<E>>;
