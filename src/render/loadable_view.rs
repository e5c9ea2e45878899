//! Renderer for [`LoadableState`].

use crate::config::{LoaderConfig, ViewLabels};
use crate::loadable::{LoadableBinding, LoadableCommand, LoadableState};
use crate::mailbox::ViewAction;

use super::default_view::{DefaultView, FailureView, LoadingView};

type ViewFactory<V> = Box<dyn Fn() -> V>;
type ContentFactory<T, V> = Box<dyn Fn(&T) -> V>;
type LoadingFactory<T, V> = Box<dyn Fn(LoadingView<'_, T>) -> V>;
type ErrorFactory<V> = Box<dyn Fn(FailureView<'_>) -> V>;

/// Maps a [`LoadableState`] onto caller-supplied views.
///
/// `Idle` posts a single `Fetch` and shows the empty view. The loading
/// view gets the stale value and a cancel action so it can keep old
/// content on screen. Every failure offers a retry that fetches again.
pub struct LoadableRenderer<T, V> {
    binding: LoadableBinding<T>,
    content: ContentFactory<T, V>,
    empty: Option<ViewFactory<V>>,
    loading: Option<LoadingFactory<T, V>>,
    error: Option<ErrorFactory<V>>,
    labels: ViewLabels,
    hide_loading: bool,
    fetch_requested: bool,
}

impl<T, V> LoadableRenderer<T, V>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    V: From<DefaultView>,
{
    pub fn new(binding: LoadableBinding<T>, content: impl Fn(&T) -> V + 'static) -> Self {
        Self {
            binding,
            content: Box::new(content),
            empty: None,
            loading: None,
            error: None,
            labels: ViewLabels::default(),
            hide_loading: false,
            fetch_requested: false,
        }
    }

    pub fn with_empty_view(mut self, view: impl Fn() -> V + 'static) -> Self {
        self.empty = Some(Box::new(view));
        self
    }

    pub fn with_loading_view(mut self, view: impl Fn(LoadingView<'_, T>) -> V + 'static) -> Self {
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

    /// Render the blank view instead of the loading view while loading.
    pub fn hide_loading(mut self, hide: bool) -> Self {
        self.hide_loading = hide;
        self
    }

    pub fn with_config(self, config: &LoaderConfig) -> Self {
        self.with_labels(config.labels.clone())
            .hide_loading(config.hide_loading)
    }

    pub fn binding(&self) -> &LoadableBinding<T> {
        &self.binding
    }

    pub async fn changed(&mut self) -> bool {
        self.binding.changed().await
    }

    /// Select the view for the current state.
    pub fn render(&mut self) -> V {
        let state = self.binding.state.borrow_and_update().clone();
        match &state {
            LoadableState::Idle => {
                if !self.fetch_requested {
                    self.fetch_requested = true;
                    tracing::debug!("idle state rendered; requesting fetch");
                    self.binding.handle().send(LoadableCommand::Fetch);
                }
                match &self.empty {
                    Some(view) => view(),
                    None => V::from(DefaultView::Blank),
                }
            }
            LoadableState::Loading { .. } if self.hide_loading => V::from(DefaultView::Blank),
            LoadableState::Loading { last, .. } => {
                let context = LoadingView {
                    last: last.as_ref(),
                    cancel: ViewAction::post(self.binding.handle(), LoadableCommand::Cancel),
                };
                match &self.loading {
                    Some(view) => view(context),
                    None => V::from(DefaultView::Spinner {
                        label: self.labels.loading.clone(),
                    }),
                }
            }
            LoadableState::Loaded(value) => (self.content)(value),
            LoadableState::Failed(error) => {
                let failure = FailureView {
                    error,
                    retry: Some(ViewAction::post(self.binding.handle(), LoadableCommand::Fetch)),
                };
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
}
