//! Async loading that keeps the last good value while refetching.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - `LoadableState` lifecycle enum
//! - `intent.rs` - Fetch lifecycle events, including cancellation
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `runner.rs` - Owns the state, the cancel token and the fetch task

mod intent;
mod reducer;
mod runner;
mod state;

pub use intent::LoadableIntent;
pub use reducer::LoadableReducer;
pub use runner::{
    LoadableBinding, LoadableCommand, LoadableEvent, LoadableHandle, LoadableTaskRunner,
    DEFAULT_SETTLE_DELAY,
};
pub use state::LoadableState;
