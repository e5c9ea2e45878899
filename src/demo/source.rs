//! Fake data source with configurable latency and failure rate.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct SimulatedSource {
    latency: Duration,
    fail_every: u32,
    calls: Arc<AtomicU32>,
}

impl SimulatedSource {
    pub fn new(latency: Duration, fail_every: u32) -> Self {
        Self {
            latency,
            fail_every,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// One load. Fails on every `fail_every`-th call.
    pub async fn load(&self) -> anyhow::Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.latency).await;
        if self.fail_every > 0 && call % self.fail_every == 0 {
            anyhow::bail!("simulated network failure on load #{}", call);
        }
        Ok(format!("Payload #{}", call))
    }

    /// Cached value served by the fallback source.
    pub async fn cached(&self) -> anyhow::Result<String> {
        Ok("Cached payload".to_string())
    }
}
