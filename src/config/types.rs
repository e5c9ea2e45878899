use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Delay before a loadable fetch settles, in milliseconds (default: 350).
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Render the blank view instead of the loading view while a load or
    /// fetch is in flight. Honored by both renderers.
    #[serde(default)]
    pub hide_loading: bool,
    /// Text used by the default views.
    #[serde(default)]
    pub labels: ViewLabels,
}

/// Text shown by the default views.
///
/// Passed explicitly to renderers; there is no process-wide string table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewLabels {
    /// Caption next to the spinner (default: "Loading...").
    #[serde(default = "default_loading_label")]
    pub loading: String,
    /// Retry button text (default: "Retry").
    #[serde(default = "default_retry_label")]
    pub retry: String,
    /// Cancel button text (default: "Cancel").
    #[serde(default = "default_cancel_label")]
    pub cancel: String,
}

fn default_settle_delay_ms() -> u64 {
    350
}

fn default_loading_label() -> String {
    "Loading...".to_string()
}

fn default_retry_label() -> String {
    "Retry".to_string()
}

fn default_cancel_label() -> String {
    "Cancel".to_string()
}

impl LoaderConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            hide_loading: false,
            labels: ViewLabels::default(),
        }
    }
}

impl Default for ViewLabels {
    fn default() -> Self {
        Self {
            loading: default_loading_label(),
            retry: default_retry_label(),
            cancel: default_cancel_label(),
        }
    }
}
