//! State for the loadable state machine.

use crate::cancel::CancelToken;
use crate::error::LoadError;
use crate::mvi::UiState;

/// Lifecycle of a fetch that retains the last good value.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadableState<T> {
    /// No fetch has been requested.
    Idle,

    /// A fetch is in flight.
    Loading {
        /// Most recent good value from before this fetch, if any.
        last: Option<T>,
        /// Cancels the in-flight fetch.
        cancel: CancelToken,
    },

    /// The last fetch produced a value.
    Loaded(T),

    /// The last fetch failed or was cancelled with nothing to fall back to.
    Failed(LoadError),
}

impl<T> Default for LoadableState<T> {
    fn default() -> Self {
        LoadableState::Idle
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> UiState for LoadableState<T> {}

impl<T> LoadableState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// `Loaded` value, or the stale value while `Loading`.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Loading { last, .. } => last.as_ref(),
            _ => None,
        }
    }

    /// Consuming variant of [`value`](Self::value).
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Loading { last, .. } => last,
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Variant name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_is_default() {
        assert!(LoadableState::<u8>::default().is_idle());
    }

    #[test]
    fn value_includes_stale_value_while_loading() {
        let loading = LoadableState::Loading {
            last: Some(4u8),
            cancel: CancelToken::new(),
        };
        assert_eq!(loading.value(), Some(&4));
        assert_eq!(LoadableState::Loaded(5u8).value(), Some(&5));
        assert_eq!(LoadableState::<u8>::Failed(LoadError::Cancelled).value(), None);
        assert_eq!(LoadableState::<u8>::Idle.value(), None);
    }

    #[test]
    fn error_only_for_failed() {
        let failed = LoadableState::<u8>::Failed(LoadError::Cancelled);
        assert_eq!(failed.error(), Some(&LoadError::Cancelled));
        assert_eq!(LoadableState::Loaded(1u8).error(), None);
    }
}
