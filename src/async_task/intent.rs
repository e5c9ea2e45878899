//! Intents for the async loading state machine.

use crate::error::LoadError;
use crate::mvi::Intent;

/// Fetch lifecycle events applied by [`AsyncReducer`](super::AsyncReducer).
#[derive(Debug)]
pub enum AsyncIntent<T> {
    /// A visible load started.
    Start,

    /// The bound operation produced a value.
    Succeeded(T),

    /// The bound operation failed.
    Failed(LoadError),
}

impl<T: Send + 'static> Intent for AsyncIntent<T> {}
