//! Single-shot async loading without stale-value retention.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - `AsyncState` lifecycle enum
//! - `intent.rs` - Fetch lifecycle events
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `runner.rs` - Owns the state, spawns work, applies completions

mod intent;
mod reducer;
mod runner;
mod state;

pub use intent::AsyncIntent;
pub use reducer::AsyncReducer;
pub use runner::{AsyncBinding, AsyncCommand, AsyncHandle, AsyncTaskRunner};
pub use state::AsyncState;
