//! Probe pacing
//!
//! Probes in one audit run strictly in sequence with a minimum delay in
//! between, mimicking human browsing cadence so the sweep does not trip the
//! target's abuse defenses. The delay is deliberate policy, not a tunable
//! performance knob. The seam exists so tests can run without real sleeps.

use async_trait::async_trait;
use std::time::Duration;

/// Pacing policy applied between consecutive probes
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Suspend until the next probe may run
    async fn pause(&self);
}

/// Real pacing backed by the tokio timer
pub struct SleepPacer {
    delay: Duration,
}

impl SleepPacer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// Pacer that does not wait, for deterministic tests
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}
