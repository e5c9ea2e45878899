//! Shared test utilities: scripted operations and a test view type.

#![allow(dead_code, unused_imports)]

use loadable::{AsyncTaskRunner, DefaultView, LoadableTaskRunner, ViewAction};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Operation that replays scripted results, optionally waiting for
/// [`release`](Script::release) before each one settles.
pub struct Script<T> {
    results: Mutex<VecDeque<Result<T, String>>>,
    gate: Option<Semaphore>,
    calls: AtomicUsize,
}

impl<T: Send + 'static> Script<T> {
    /// Results are returned immediately.
    pub fn new(results: Vec<Result<T, String>>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            gate: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Each call blocks until released.
    pub fn gated(results: Vec<Result<T, String>>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            gate: Some(Semaphore::new(0)),
            calls: AtomicUsize::new(0),
        })
    }

    /// Let one pending call settle.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn next(&self) -> anyhow::Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        match self.results.lock().pop_front() {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("script exhausted")),
        }
    }
}

pub fn async_runner<T>(script: &Arc<Script<T>>) -> AsyncTaskRunner<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let script = Arc::clone(script);
    AsyncTaskRunner::new(move || {
        let script = Arc::clone(&script);
        async move { script.next().await }
    })
}

/// Loadable runner without a settle delay.
pub fn loadable_runner<T>(script: &Arc<Script<T>>) -> LoadableTaskRunner<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    let script = Arc::clone(script);
    LoadableTaskRunner::new(move || {
        let script = Arc::clone(&script);
        async move { script.next().await }
    })
    .with_settle_delay(Duration::ZERO)
}

/// Let spawned tasks run until they block.
pub async fn run_pending_tasks() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

/// View type used by renderer tests.
#[derive(Debug, Clone, PartialEq)]
pub enum TestView {
    Blank,
    Spinner(String),
    Error {
        message: String,
        retry_label: String,
        retry: Option<ViewAction>,
    },
    Content(String),
    Custom(String),
}

impl From<DefaultView> for TestView {
    fn from(view: DefaultView) -> Self {
        match view {
            DefaultView::Blank => TestView::Blank,
            DefaultView::Spinner { label } => TestView::Spinner(label),
            DefaultView::Error {
                message,
                retry_label,
                retry,
            } => TestView::Error {
                message,
                retry_label,
                retry,
            },
        }
    }
}
