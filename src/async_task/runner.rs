//! Runner that owns an [`AsyncState`] and drives its bound operation.

use std::future::Future;

use tokio::sync::{mpsc, watch};

use crate::error::LoadError;
use crate::mailbox::{Envelope, RunnerHandle, StateBinding};
use crate::mvi::Reducer;
use crate::operation::Operation;

use super::intent::AsyncIntent;
use super::reducer::AsyncReducer;
use super::state::AsyncState;

/// Commands a view can post to an [`AsyncTaskRunner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncCommand {
    Load,
    LoadIfNeeded,
    LoadSilently,
}

type Settled<T> = Result<T, LoadError>;

pub type AsyncHandle<T> = RunnerHandle<AsyncCommand, Settled<T>>;
pub type AsyncBinding<T> = StateBinding<AsyncState<T>, AsyncCommand, Settled<T>>;

#[derive(Debug, Clone, Copy)]
struct InFlight {
    generation: u64,
    silent: bool,
}

/// Drives one async operation with at most one invocation in flight.
///
/// All methods must be called from the single owning context, inside a
/// tokio runtime. Completions from background tasks are queued and only
/// applied by [`pump`](Self::pump), [`next_event`](Self::next_event) or
/// [`settle`](Self::settle).
pub struct AsyncTaskRunner<T> {
    operation: Operation<T>,
    state: AsyncState<T>,
    generation: u64,
    in_flight: Option<InFlight>,
    tx: mpsc::UnboundedSender<Envelope<AsyncCommand, Settled<T>>>,
    rx: mpsc::UnboundedReceiver<Envelope<AsyncCommand, Settled<T>>>,
    publisher: watch::Sender<AsyncState<T>>,
}

impl<T> AsyncTaskRunner<T>
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
        let (publisher, _) = watch::channel(AsyncState::Empty);
        Self {
            operation,
            state: AsyncState::Empty,
            generation: 0,
            in_flight: None,
            tx,
            rx,
            publisher,
        }
    }

    pub fn state(&self) -> &AsyncState<T> {
        &self.state
    }

    /// True while an invocation (visible or silent) has not settled.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn handle(&self) -> AsyncHandle<T> {
        RunnerHandle::new(self.tx.clone())
    }

    /// Bind an observer to this runner's state.
    pub fn subscribe(&self) -> AsyncBinding<T> {
        StateBinding::new(self.publisher.subscribe(), self.handle())
    }

    /// Start a visible load unless one is already in progress.
    pub fn load(&mut self) {
        if self.state.is_in_progress() {
            tracing::debug!("load ignored: already in progress");
            return;
        }

        if let Some(flight) = self.in_flight.as_mut() {
            // A silent reload is running; show it instead of starting another.
            flight.silent = false;
            tracing::debug!(generation = flight.generation, "promoting silent reload");
            self.dispatch(AsyncIntent::Start);
            return;
        }

        self.dispatch(AsyncIntent::Start);
        self.spawn(false);
    }

    /// Load only from `Empty` or `Failure`.
    pub fn load_if_needed(&mut self) {
        if self.state.needs_load() {
            self.load();
        }
    }

    /// Reload without entering `InProgress`.
    ///
    /// Refused while any invocation is in flight.
    pub fn load_silently(&mut self) {
        if self.state.is_in_progress() || self.in_flight.is_some() {
            tracing::debug!("silent reload ignored: fetch in flight");
            return;
        }
        self.spawn(true);
    }

    /// Apply every queued command and completion. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(envelope) = self.rx.try_recv() {
            self.handle_envelope(envelope);
            handled += 1;
        }
        handled
    }

    /// Wait for the next command or completion and apply it.
    pub async fn next_event(&mut self) {
        if let Some(envelope) = self.rx.recv().await {
            self.handle_envelope(envelope);
        }
    }

    /// Apply queued messages until no invocation is in flight.
    pub async fn settle(&mut self) {
        loop {
            self.pump();
            if self.in_flight.is_none() {
                return;
            }
            self.next_event().await;
        }
    }

    fn handle_envelope(&mut self, envelope: Envelope<AsyncCommand, Settled<T>>) {
        match envelope {
            Envelope::Command(command) => {
                tracing::debug!(?command, "async command");
                match command {
                    AsyncCommand::Load => self.load(),
                    AsyncCommand::LoadIfNeeded => self.load_if_needed(),
                    AsyncCommand::LoadSilently => self.load_silently(),
                }
            }
            Envelope::Event { generation, event } => self.complete(generation, event),
        }
    }

    fn spawn(&mut self, silent: bool) {
        self.generation += 1;
        let generation = self.generation;
        self.in_flight = Some(InFlight { generation, silent });

        let operation = self.operation.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = operation.run().await;
            let _ = tx.send(Envelope::Event {
                generation,
                event: result,
            });
        });
        tracing::debug!(generation, silent, "operation started");
    }

    fn complete(&mut self, generation: u64, result: Settled<T>) {
        let flight = match self.in_flight {
            Some(flight) if flight.generation == generation => flight,
            _ => {
                tracing::debug!(generation, "discarding stale completion");
                return;
            }
        };
        self.in_flight = None;

        match result {
            Ok(value) => self.dispatch(AsyncIntent::Succeeded(value)),
            Err(error) => {
                tracing::warn!(generation, error = %error, "operation failed");
                // A failed background refresh keeps the content on screen.
                if flight.silent && self.state.value().is_some() {
                    return;
                }
                self.dispatch(AsyncIntent::Failed(error));
            }
        }
    }

    fn dispatch(&mut self, intent: AsyncIntent<T>) {
        AsyncReducer::<T>::apply(&mut self.state, intent);
        tracing::debug!(state = self.state.name(), "async state transition");
        self.publisher.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_runner(calls: Arc<AtomicUsize>) -> AsyncTaskRunner<usize> {
        AsyncTaskRunner::new(move || {
            let calls = Arc::clone(&calls);
            async move { Ok(calls.fetch_add(1, Ordering::SeqCst) + 1) }
        })
    }

    #[tokio::test]
    async fn load_twice_starts_one_operation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut runner = counting_runner(Arc::clone(&calls));
        runner.load();
        runner.load();
        assert!(runner.state().is_in_progress());
        runner.settle().await;
        assert_eq!(runner.state(), &AsyncState::Success(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn silent_reload_keeps_state_until_settled() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut runner = counting_runner(Arc::clone(&calls));
        runner.load();
        runner.settle().await;

        runner.load_silently();
        assert_eq!(runner.state(), &AsyncState::Success(1));
        assert!(runner.is_fetching());
        runner.settle().await;
        assert_eq!(runner.state(), &AsyncState::Success(2));
    }

    #[tokio::test]
    async fn load_promotes_silent_reload() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut runner = counting_runner(Arc::clone(&calls));
        runner.load_silently();
        runner.load();
        assert!(runner.state().is_in_progress());
        runner.settle().await;
        assert_eq!(runner.state(), &AsyncState::Success(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut runner = counting_runner(calls);
        runner.complete(42, Ok(99));
        assert_eq!(runner.state(), &AsyncState::Empty);
    }
}
