//! Intents for the loadable state machine.

use crate::cancel::CancelToken;
use crate::error::LoadError;
use crate::mvi::Intent;

/// Fetch lifecycle events applied by [`LoadableReducer`](super::LoadableReducer).
#[derive(Debug)]
pub enum LoadableIntent<T> {
    /// A fetch started. The current value becomes the stale `last`.
    Start {
        cancel: CancelToken,
    },

    /// The fallback source produced a value to show while the primary runs.
    Interim(T),

    /// The primary operation produced a value.
    Succeeded(T),

    /// The primary operation failed.
    Failed(LoadError),

    /// The user cancelled the in-flight fetch.
    /// The caller has already cancelled the token.
    Cancel,
}

impl<T: Send + 'static> Intent for LoadableIntent<T> {}
