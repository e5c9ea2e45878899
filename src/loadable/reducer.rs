//! Reducer for the loadable state machine.

use std::marker::PhantomData;

use crate::error::LoadError;
use crate::mvi::Reducer;

use super::intent::LoadableIntent;
use super::state::LoadableState;

/// Reducer for [`LoadableState`] transitions.
///
/// Pure function. Cancelling the token and discarding stale completions
/// are handled by the runner around the dispatch call.
pub struct LoadableReducer<T> {
    _marker: PhantomData<T>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Reducer for LoadableReducer<T> {
    type State = LoadableState<T>;
    type Intent = LoadableIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LoadableIntent::Start { cancel } => LoadableState::Loading {
                last: state.into_value(),
                cancel,
            },

            LoadableIntent::Interim(value) => match state {
                LoadableState::Loading { cancel, .. } => LoadableState::Loading {
                    last: Some(value),
                    cancel,
                },
                other => other,
            },

            LoadableIntent::Succeeded(value) => match state {
                LoadableState::Loading { .. } => LoadableState::Loaded(value),
                other => other,
            },

            LoadableIntent::Failed(error) => match state {
                LoadableState::Loading { .. } => LoadableState::Failed(error),
                other => other,
            },

            LoadableIntent::Cancel => match state {
                LoadableState::Loading {
                    last: Some(value), ..
                } => LoadableState::Loaded(value),
                LoadableState::Loading { last: None, .. } => {
                    LoadableState::Failed(LoadError::Cancelled)
                }
                other => other,
            },
        }
    }
}
