//! Loader configuration: settle delay, loading-view policy and view labels.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{LoaderConfig, ViewLabels};
