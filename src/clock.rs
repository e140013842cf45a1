//! Wall-clock and sleep abstraction.
//!
//! The admission loop and the operation poller only observe time through
//! [`Clock`], so tests can drive them with a manual clock instead of waiting.

use std::time::Duration;

use async_trait::async_trait;

/// Source of the current time and of suspension
#[async_trait]
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> i64;

    /// Suspend the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Real time backed by chrono and tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
