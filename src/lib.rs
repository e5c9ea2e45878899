//! Async-state-to-view binding.
//!
//! Two state machines model the lifecycle of an asynchronous load:
//!
//! - [`AsyncState`]: `Empty → InProgress → Success | Failure`
//! - [`LoadableState`]: `Idle → Loading → Loaded | Failed`, keeping the last
//!   good value visible while a new fetch runs and supporting cancellation
//!
//! A runner owns each state and the single in-flight operation. Renderers
//! observe runner state and select one of the caller's views.

pub mod async_task;
pub mod cancel;
pub mod config;
pub mod error;
pub mod loadable;
pub mod logging;
pub mod mailbox;
pub mod mvi;
pub mod operation;
pub mod render;
pub mod ui;

pub use async_task::{AsyncCommand, AsyncState, AsyncTaskRunner};
pub use cancel::CancelToken;
pub use config::{ConfigError, LoaderConfig, ViewLabels};
pub use error::LoadError;
pub use loadable::{LoadableCommand, LoadableState, LoadableTaskRunner};
pub use mailbox::{RunnerHandle, StateBinding, ViewAction};
pub use operation::Operation;
pub use render::{AsyncRenderer, DefaultView, FailureView, LoadableRenderer, LoadingView};
