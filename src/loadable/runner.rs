//! Runner that owns a [`LoadableState`] and its cancel token.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::cancel::CancelToken;
use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::mailbox::{Envelope, RunnerHandle, StateBinding};
use crate::mvi::Reducer;
use crate::operation::Operation;

use super::intent::LoadableIntent;
use super::reducer::LoadableReducer;
use super::state::LoadableState;

/// Pause before the terminal transition so fast loads don't flash a spinner.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(350);

/// Commands a view can post to a [`LoadableTaskRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadableCommand {
    Fetch,
    Refetch,
    Cancel,
}

/// Progress reported by a fetch task.
#[derive(Debug)]
pub enum LoadableEvent<T> {
    /// Fallback value to show while the primary operation runs.
    Interim(T),
    /// The primary operation settled.
    Settled(Result<T, LoadError>),
}

pub type LoadableHandle<T> = RunnerHandle<LoadableCommand, LoadableEvent<T>>;
pub type LoadableBinding<T> = StateBinding<LoadableState<T>, LoadableCommand, LoadableEvent<T>>;

type Mail<T> = Envelope<LoadableCommand, LoadableEvent<T>>;

/// Drives a primary operation, with an optional fallback source, keeping
/// the last good value visible while a new fetch runs.
///
/// All methods must be called from the single owning context, inside a
/// tokio runtime.
pub struct LoadableTaskRunner<T> {
    operation: Operation<T>,
    fallback: Option<Operation<T>>,
    settle_delay: Duration,
    state: LoadableState<T>,
    generation: u64,
    in_flight: Option<u64>,
    tx: mpsc::UnboundedSender<Mail<T>>,
    rx: mpsc::UnboundedReceiver<Mail<T>>,
    publisher: watch::Sender<LoadableState<T>>,
}

impl<T> LoadableTaskRunner<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self::from_operation(Operation::new(operation))
    }

    pub fn from_operation(operation: Operation<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (publisher, _) = watch::channel(LoadableState::Idle);
        Self {
            operation,
            fallback: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
            state: LoadableState::Idle,
            generation: 0,
            in_flight: None,
            tx,
            rx,
            publisher,
        }
    }

    /// Source drained before the primary to supply an interim value.
    pub fn with_fallback<F, Fut>(mut self, fallback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.fallback = Some(Operation::new(fallback));
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_config(self, config: &LoaderConfig) -> Self {
        self.with_settle_delay(config.settle_delay())
    }

    pub fn state(&self) -> &LoadableState<T> {
        &self.state
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn handle(&self) -> LoadableHandle<T> {
        RunnerHandle::new(self.tx.clone())
    }

    /// Bind an observer to this runner's state.
    pub fn subscribe(&self) -> LoadableBinding<T> {
        StateBinding::new(self.publisher.subscribe(), self.handle())
    }

    /// Start a fetch unless one is already loading.
    pub fn fetch(&mut self) {
        if self.state.is_loading() {
            tracing::debug!("fetch ignored: already loading");
            return;
        }
        self.start();
    }

    /// Replace any in-flight fetch with a fresh one.
    ///
    /// The old token is cancelled, never stacked; the stale value carries over.
    pub fn refetch(&mut self) {
        if let LoadableState::Loading { cancel, .. } = &self.state {
            cancel.cancel();
            tracing::debug!(generation = self.generation, "replacing in-flight fetch");
        }
        self.start();
    }

    /// Cancel the in-flight fetch. No-op unless loading.
    pub fn cancel(&mut self) {
        let LoadableState::Loading { cancel, .. } = &self.state else {
            tracing::debug!(state = self.state.name(), "cancel ignored: not loading");
            return;
        };
        cancel.cancel();
        self.in_flight = None;
        tracing::info!(generation = self.generation, "fetch cancelled");
        self.dispatch(LoadableIntent::Cancel);
    }

    /// Apply every queued command and event. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(envelope) = self.rx.try_recv() {
            self.handle_envelope(envelope);
            handled += 1;
        }
        handled
    }

    /// Wait for the next command or event and apply it.
    pub async fn next_event(&mut self) {
        if let Some(envelope) = self.rx.recv().await {
            self.handle_envelope(envelope);
        }
    }

    /// Apply queued messages until no fetch is in flight.
    pub async fn settle(&mut self) {
        loop {
            self.pump();
            if self.in_flight.is_none() {
                return;
            }
            self.next_event().await;
        }
    }

    fn handle_envelope(&mut self, envelope: Mail<T>) {
        match envelope {
            Envelope::Command(command) => {
                tracing::debug!(?command, "loadable command");
                match command {
                    LoadableCommand::Fetch => self.fetch(),
                    LoadableCommand::Refetch => self.refetch(),
                    LoadableCommand::Cancel => self.cancel(),
                }
            }
            Envelope::Event { generation, event } => self.on_event(generation, event),
        }
    }

    fn start(&mut self) {
        let cancel = CancelToken::new();
        self.generation += 1;
        let generation = self.generation;
        self.in_flight = Some(generation);
        self.dispatch(LoadableIntent::Start {
            cancel: cancel.clone(),
        });

        tokio::spawn(run_fetch(
            self.operation.clone(),
            self.fallback.clone(),
            self.settle_delay,
            cancel,
            self.tx.clone(),
            generation,
        ));
        tracing::debug!(generation, "fetch started");
    }

    fn on_event(&mut self, generation: u64, event: LoadableEvent<T>) {
        if self.in_flight != Some(generation) {
            tracing::debug!(generation, "discarding stale fetch event");
            return;
        }

        match event {
            LoadableEvent::Interim(value) => self.dispatch(LoadableIntent::Interim(value)),
            LoadableEvent::Settled(Ok(value)) => {
                self.in_flight = None;
                self.dispatch(LoadableIntent::Succeeded(value));
            }
            LoadableEvent::Settled(Err(error)) => {
                self.in_flight = None;
                tracing::warn!(generation, error = %error, "fetch failed");
                self.dispatch(LoadableIntent::Failed(error));
            }
        }
    }

    fn dispatch(&mut self, intent: LoadableIntent<T>) {
        LoadableReducer::<T>::apply(&mut self.state, intent);
        tracing::debug!(state = self.state.name(), "loadable state transition");
        self.publisher.send_replace(self.state.clone());
    }
}

async fn run_fetch<T: Send + 'static>(
    operation: Operation<T>,
    fallback: Option<Operation<T>>,
    settle_delay: Duration,
    cancel: CancelToken,
    tx: mpsc::UnboundedSender<Mail<T>>,
    generation: u64,
) {
    let work = async {
        if let Some(fallback) = &fallback {
            match fallback.run().await {
                Ok(value) => {
                    let _ = tx.send(Envelope::Event {
                        generation,
                        event: LoadableEvent::Interim(value),
                    });
                }
                Err(error) => {
                    tracing::warn!(generation, error = %error, "fallback source failed");
                }
            }
        }

        let result = operation.run().await;
        if !settle_delay.is_zero() {
            tokio::time::sleep(settle_delay).await;
        }
        result
    };

    tokio::select! {
        _ = cancel.cancelled() => {
            tracing::debug!(generation, "fetch task stopped by cancellation");
        }
        result = work => {
            let _ = tx.send(Envelope::Event {
                generation,
                event: LoadableEvent::Settled(result),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_settles_to_loaded() {
        let mut runner =
            LoadableTaskRunner::new(|| async { Ok(5u32) }).with_settle_delay(Duration::ZERO);
        runner.fetch();
        assert!(matches!(runner.state(), LoadableState::Loading { last: None, .. }));
        runner.settle().await;
        assert_eq!(runner.state(), &LoadableState::Loaded(5));
    }

    #[tokio::test]
    async fn refetch_replaces_cancel_token() {
        let mut runner = LoadableTaskRunner::new(|| async { Ok(1u32) });
        runner.fetch();
        let first = match runner.state() {
            LoadableState::Loading { cancel, .. } => cancel.clone(),
            other => panic!("Expected Loading, got {:?}", other),
        };
        runner.refetch();
        assert!(first.is_cancelled());
        match runner.state() {
            LoadableState::Loading { cancel, .. } => {
                assert_ne!(cancel, &first);
                assert!(!cancel.is_cancelled());
            }
            other => panic!("Expected Loading, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn settle_delay_holds_loading_state() {
        let mut runner = LoadableTaskRunner::new(|| async { Ok(2u32) });
        assert_eq!(runner.settle_delay(), DEFAULT_SETTLE_DELAY);
        runner.fetch();
        tokio::time::sleep(Duration::from_millis(100)).await;
        runner.pump();
        assert!(runner.state().is_loading());
        runner.settle().await;
        assert_eq!(runner.state(), &LoadableState::Loaded(2));
    }

    #[test]
    fn stale_event_is_discarded() {
        let mut runner = LoadableTaskRunner::new(|| async { Ok(1u32) });
        runner.on_event(3, LoadableEvent::Settled(Ok(8)));
        assert!(runner.state().is_idle());
    }
}
