//! Reducer trait shared by the loading state machines.

use super::intent::Intent;
use super::state::UiState;

/// Applies fetch lifecycle events to a loading state.
///
/// `reduce` is the only place a state transition is decided and must stay
/// pure: (State, Intent) -> State. Spawning work, cancelling tokens and
/// publishing snapshots belong to the runner.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Reduce `state` in place, leaving the default state behind only for
    /// the duration of the call.
    fn apply(state: &mut Self::State, intent: Self::Intent) {
        *state = Self::reduce(std::mem::take(state), intent);
    }
}
