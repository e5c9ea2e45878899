//! State → view selection.
//!
//! Renderers read state snapshots from a runner binding and pick one of
//! the caller's view factories. The view type `V` is opaque here; the only
//! requirement is that it can be built from a [`DefaultView`] so that the
//! built-in empty, loading and error views work.

mod async_view;
mod default_view;
mod loadable_view;

pub use async_view::AsyncRenderer;
pub use default_view::{DefaultView, FailureView, LoadingView};
pub use loadable_view::LoadableRenderer;
