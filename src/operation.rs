//! The bound async operation a runner drives.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::JoinError;

use crate::error::LoadError;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Zero-argument async callable producing `anyhow::Result<T>`.
///
/// Cheap to clone; every call starts a fresh invocation.
pub struct Operation<T> {
    call: Arc<dyn Fn() -> BoxFuture<anyhow::Result<T>> + Send + Sync>,
}

impl<T: Send + 'static> Operation<T> {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self {
            call: Arc::new(move || Box::pin(f())),
        }
    }

    /// Run one invocation on its own task.
    ///
    /// The callable itself is invoked on that task too, so a panic while
    /// building the future is captured like one raised while polling it.
    /// Errors and panics are folded into [`LoadError`]. Dropping the
    /// returned future detaches the invocation instead of aborting it.
    pub async fn run(&self) -> Result<T, LoadError> {
        let call = Arc::clone(&self.call);
        settled(tokio::spawn(async move { call().await }).await)
    }
}

impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        Self {
            call: Arc::clone(&self.call),
        }
    }
}

fn settled<T>(joined: Result<anyhow::Result<T>, JoinError>) -> Result<T, LoadError> {
    match joined {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(LoadError::operation(err)),
        Err(join) if join.is_panic() => Err(LoadError::Panicked(panic_message(join.into_panic()))),
        // Aborted by the runtime (e.g. shutdown), not by the user.
        Err(join) => Err(LoadError::operation(join)),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
