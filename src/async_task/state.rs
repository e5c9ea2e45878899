//! State for the async loading state machine.

use crate::error::LoadError;
use crate::mvi::UiState;

/// Lifecycle of one asynchronous fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncState<T> {
    /// Nothing loaded yet.
    Empty,

    /// A visible load is running.
    InProgress,

    /// The last load produced a value.
    Success(T),

    /// The last load failed.
    Failure {
        error: LoadError,
        /// Whether the view should offer a retry.
        retryable: bool,
    },
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        AsyncState::Empty
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> UiState for AsyncState<T> {}

impl<T> AsyncState<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Whether `load_if_needed` should start a load from this state.
    pub fn needs_load(&self) -> bool {
        matches!(self, Self::Empty | Self::Failure { .. })
    }

    /// The loaded value, only for `Success`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The error, only for `Failure`.
    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Failure { retryable: true, .. })
    }

    /// Variant name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::InProgress => "in_progress",
            Self::Success(_) => "success",
            Self::Failure { .. } => "failure",
        }
    }
}
