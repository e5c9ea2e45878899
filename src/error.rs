//! Error types carried by loading state.
//!
//! Nothing raised by a bound operation ever escapes a runner; it is stored
//! in the `Failure` / `Failed` state variant as a [`LoadError`].

use std::sync::Arc;

use thiserror::Error;

/// Why a load did not produce a value.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// The bound operation returned an error. Opaque to the core.
    #[error("{0}")]
    Operation(Arc<anyhow::Error>),

    /// The fetch was cancelled and no earlier value was available.
    #[error("Cancelled by user")]
    Cancelled,

    /// The bound operation panicked.
    #[error("Operation panicked: {0}")]
    Panicked(String),
}

impl LoadError {
    /// Wrap an operation error.
    pub fn operation(err: impl Into<anyhow::Error>) -> Self {
        LoadError::Operation(Arc::new(err.into()))
    }

    /// True for the distinguished cancellation kind.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoadError::Cancelled)
    }

    /// Short message suitable for an error view.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Operation(err) => err.to_string(),
            LoadError::Cancelled => "Loading was cancelled".to_string(),
            LoadError::Panicked(_) => "Something went wrong while loading".to_string(),
        }
    }
}

impl PartialEq for LoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LoadError::Operation(a), LoadError::Operation(b)) => {
                Arc::ptr_eq(a, b) || a.to_string() == b.to_string()
            }
            (LoadError::Cancelled, LoadError::Cancelled) => true,
            (LoadError::Panicked(a), LoadError::Panicked(b)) => a == b,
            _ => false,
        }
    }
}
