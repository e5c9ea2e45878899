//! Plumbing between a runner, the tasks it spawns, and its observers.
//!
//! A runner owns a mailbox. Background tasks post completions into it,
//! views post commands into it, and the owning context drains it. State
//! therefore only ever changes on the owning context.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::mvi::UiState;

/// Message delivered to a runner's mailbox.
#[derive(Debug)]
pub(crate) enum Envelope<C, E> {
    /// Request from a view or another part of the UI.
    Command(C),
    /// Lifecycle event from the task running the bound operation.
    Event { generation: u64, event: E },
}

/// Cloneable sender for commands addressed to one runner.
pub struct RunnerHandle<C, E> {
    tx: mpsc::UnboundedSender<Envelope<C, E>>,
}

impl<C, E> RunnerHandle<C, E> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Envelope<C, E>>) -> Self {
        Self { tx }
    }

    /// Queue a command. Returns `false` when the runner has been dropped.
    pub fn send(&self, command: C) -> bool {
        self.tx.send(Envelope::Command(command)).is_ok()
    }
}

impl<C, E> Clone for RunnerHandle<C, E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

/// Read side of a runner: state snapshots plus a command handle.
pub struct StateBinding<S, C, E> {
    pub(crate) state: watch::Receiver<S>,
    pub(crate) handle: RunnerHandle<C, E>,
}

impl<S: UiState, C, E> StateBinding<S, C, E> {
    pub(crate) fn new(state: watch::Receiver<S>, handle: RunnerHandle<C, E>) -> Self {
        Self { state, handle }
    }

    /// Copy of the most recently published state.
    pub fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    /// Wait until the runner publishes a new state.
    ///
    /// Returns `false` once the runner is gone.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    /// True when a state newer than the last one observed through
    /// [`changed`](Self::changed) has been published.
    pub fn has_changed(&self) -> bool {
        self.state.has_changed().unwrap_or(false)
    }

    pub fn handle(&self) -> &RunnerHandle<C, E> {
        &self.handle
    }
}

impl<S, C, E> Clone for StateBinding<S, C, E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            handle: self.handle.clone(),
        }
    }
}

/// Action a view can trigger, such as "retry" or "cancel".
#[derive(Clone)]
pub struct ViewAction {
    trigger: Arc<dyn Fn() + Send + Sync>,
}

impl ViewAction {
    /// Action that posts `command` to the runner behind `handle`.
    pub fn post<C, E>(handle: &RunnerHandle<C, E>, command: C) -> Self
    where
        C: Clone + Send + Sync + 'static,
        E: Send + 'static,
    {
        let handle = handle.clone();
        Self {
            trigger: Arc::new(move || {
                handle.send(command.clone());
            }),
        }
    }

    pub fn invoke(&self) {
        (self.trigger)();
    }
}

impl PartialEq for ViewAction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.trigger, &other.trigger)
    }
}

impl fmt::Debug for ViewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ViewAction")
    }
}
