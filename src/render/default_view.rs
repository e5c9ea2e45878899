use crate::error::LoadError;
use crate::mailbox::ViewAction;

/// Built-in views, converted into the caller's view type.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultView {
    /// Nothing to show.
    Blank,

    /// Activity indicator with a caption.
    Spinner { label: String },

    /// Error text with an optional retry button.
    Error {
        message: String,
        retry_label: String,
        retry: Option<ViewAction>,
    },
}

/// Context handed to an error-view factory.
#[derive(Debug, Clone)]
pub struct FailureView<'a> {
    pub error: &'a LoadError,
    /// Present only when the failure is retryable.
    pub retry: Option<ViewAction>,
}

impl FailureView<'_> {
    pub fn retryable(&self) -> bool {
        self.retry.is_some()
    }
}

/// Context handed to a loadable loading-view factory.
#[derive(Debug, Clone)]
pub struct LoadingView<'a, T> {
    /// Value from before the fetch started, if any.
    pub last: Option<&'a T>,
    /// Cancels the in-flight fetch.
    pub cancel: ViewAction,
}
