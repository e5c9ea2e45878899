//! Renderer for [`AsyncState`].

use crate::async_task::{AsyncBinding, AsyncCommand, AsyncState};
use crate::config::{LoaderConfig, ViewLabels};
use crate::mailbox::ViewAction;

use super::default_view::{DefaultView, FailureView};

type ViewFactory<V> = Box<dyn Fn() -> V>;
type ContentFactory<T, V> = Box<dyn Fn(&T) -> V>;
type ErrorFactory<V> = Box<dyn Fn(FailureView<'_>) -> V>;

/// Maps an [`AsyncState`] onto caller-supplied views.
///
/// | State        | View                                          |
/// |--------------|-----------------------------------------------|
/// | `Empty`      | empty view; posts one `LoadIfNeeded`          |
/// | `InProgress` | loading view, or blank when loading is hidden |
/// | `Success`    | content view                                  |
/// | `Failure`    | error view, with retry when retryable         |
pub struct AsyncRenderer<T, V> {
    binding: AsyncBinding<T>,
    content: ContentFactory<T, V>,
    empty: Option<ViewFactory<V>>,
    loading: Option<ViewFactory<V>>,
    error: Option<ErrorFactory<V>>,
    labels: ViewLabels,
    hide_loading: bool,
    load_requested: bool,
}

impl<T, V> AsyncRenderer<T, V>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    V: From<DefaultView>,
{
    pub fn new(binding: AsyncBinding<T>, content: impl Fn(&T) -> V + 'static) -> Self {
        Self {
            binding,
            content: Box::new(content),
            empty: None,
            loading: None,
            error: None,
            labels: ViewLabels::default(),
            hide_loading: false,
            load_requested: false,
        }
    }

    pub fn with_empty_view(mut self, view: impl Fn() -> V + 'static) -> Self {
        self.empty = Some(Box::new(view));
        self
    }

    pub fn with_loading_view(mut self, view: impl Fn() -> V + 'static) -> Self {
        self.loading = Some(Box::new(view));
        self
    }

    pub fn with_error_view(mut self, view: impl Fn(FailureView<'_>) -> V + 'static) -> Self {
        self.error = Some(Box::new(view));
        self
    }

    pub fn with_labels(mut self, labels: ViewLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Render the blank view instead of the loading view while in progress.
    pub fn hide_loading(mut self, hide: bool) -> Self {
        self.hide_loading = hide;
        self
    }

    pub fn with_config(self, config: &LoaderConfig) -> Self {
        self.with_labels(config.labels.clone())
            .hide_loading(config.hide_loading)
    }

    pub fn binding(&self) -> &AsyncBinding<T> {
        &self.binding
    }

    /// Wait until the bound runner publishes a new state.
    pub async fn changed(&mut self) -> bool {
        self.binding.changed().await
    }

    /// Select the view for the current state.
    pub fn render(&mut self) -> V {
        let state = self.binding.state.borrow_and_update().clone();
        match &state {
            AsyncState::Empty => {
                self.request_initial_load();
                match &self.empty {
                    Some(view) => view(),
                    None => V::from(DefaultView::Blank),
                }
            }
            AsyncState::InProgress if self.hide_loading => V::from(DefaultView::Blank),
            AsyncState::InProgress => match &self.loading {
                Some(view) => view(),
                None => V::from(DefaultView::Spinner {
                    label: self.labels.loading.clone(),
                }),
            },
            AsyncState::Success(value) => (self.content)(value),
            AsyncState::Failure { error, retryable } => {
                let retry = retryable
                    .then(|| ViewAction::post(self.binding.handle(), AsyncCommand::Load));
                let failure = FailureView { error, retry };
                match &self.error {
                    Some(view) => view(failure),
                    None => V::from(DefaultView::Error {
                        message: failure.error.user_message(),
                        retry_label: self.labels.retry.clone(),
                        retry: failure.retry,
                    }),
                }
            }
        }
    }

    fn request_initial_load(&mut self) {
        if self.load_requested {
            return;
        }
        self.load_requested = true;
        tracing::debug!("empty state rendered; requesting load");
        self.binding.handle().send(AsyncCommand::LoadIfNeeded);
    }
}
