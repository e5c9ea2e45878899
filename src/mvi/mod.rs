//! Model-View-Intent (MVI) primitives shared by the loading state machines.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: lifecycle of one asynchronous load
//! - **Intent**: fetch lifecycle events (start, settle, cancel)
//! - **Reducer**: pure function that applies one event to the state
//!
//! Runners own the side effects (spawning work, cancelling tokens) and
//! call the reducer for every transition.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
