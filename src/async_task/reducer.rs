//! Reducer for the async loading state machine.

use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::AsyncIntent;
use super::state::AsyncState;

/// Reducer for [`AsyncState`] transitions.
///
/// Pure function. Guards such as "no second load while in progress" are
/// enforced by the runner before it dispatches.
pub struct AsyncReducer<T> {
    _marker: PhantomData<T>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Reducer for AsyncReducer<T> {
    type State = AsyncState<T>;
    type Intent = AsyncIntent<T>;

    fn reduce(_state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            AsyncIntent::Start => AsyncState::InProgress,
            AsyncIntent::Succeeded(value) => AsyncState::Success(value),
            // Operation failures are always retriable.
            AsyncIntent::Failed(error) => AsyncState::Failure {
                error,
                retryable: true,
            },
        }
    }
}
