//! # Rate Limiter
//!
//! Sliding-window admission control computed from the request log. Usage is
//! recounted with a full scan of the log on every check; the log is bounded
//! by the quotas themselves so no incremental counters are kept.

use tracing::{info, warn};

use crate::catalog::ModelQuota;
use crate::clock::Clock;
use crate::error::Result;
use crate::wal::{Context, RequestHistoryEntry};

const ONE_MINUTE_MS: i64 = 60 * 1000;
const ONE_DAY_MS: i64 = 24 * 60 * ONE_MINUTE_MS;

/// Usage of one model inside the minute and day windows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    /// Requests in the last minute
    pub rpm: u64,
    /// Requests in the last day
    pub rpd: u64,
    /// Tokens in the last minute
    pub tpm: u64,
}

impl Usage {
    /// Count the entries for `model` that fall inside each window at `now_ms`.
    pub fn measure(entries: &[RequestHistoryEntry], model: &str, now_ms: i64) -> Self {
        let mut usage = Usage::default();
        for entry in entries.iter().filter(|e| e.ai_model == model) {
            let age = now_ms - entry.time;
            if age <= ONE_MINUTE_MS {
                usage.rpm += 1;
                usage.tpm += entry.token_cost();
            }
            if age <= ONE_DAY_MS {
                usage.rpd += 1;
            }
        }
        usage
    }

    /// Quotas of `quota` this usage has reached
    pub fn exceeded(&self, quota: &ModelQuota) -> Vec<Limit> {
        let mut limits = Vec::new();
        if self.rpm >= quota.rpm {
            limits.push(Limit::Rpm);
        }
        if self.rpd >= quota.rpd {
            limits.push(Limit::Rpd);
        }
        if quota.tpm.is_some_and(|tpm| self.tpm >= tpm) {
            limits.push(Limit::Tpm);
        }
        limits
    }
}

/// A quota dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Rpm,
    Rpd,
    Tpm,
}

/// Block until the selected model in `context` is under all of its quotas.
///
/// Sleeps `wait` between checks and never gives up.
pub async fn await_admission(
    context: &Context,
    clock: &dyn Clock,
    wait: std::time::Duration,
) -> Result<()> {
    let quota = context.model()?;

    loop {
        let usage = Usage::measure(context.log.entries(), quota.model, clock.now_ms());
        let exceeded = usage.exceeded(quota);

        for limit in &exceeded {
            match limit {
                Limit::Rpm => warn!("RPM limit exceeded: {} >= {}", usage.rpm, quota.rpm),
                Limit::Rpd => warn!("RPD limit exceeded: {} >= {}", usage.rpd, quota.rpd),
                Limit::Tpm => warn!(
                    "TPM limit exceeded: {} >= {}",
                    usage.tpm,
                    quota.tpm.unwrap_or_default()
                ),
            }
        }

        match quota.tpm {
            Some(tpm) => info!(
                "RPM remaining={} / RPD remaining={} / TPM remaining={}",
                quota.rpm.saturating_sub(usage.rpm),
                quota.rpd.saturating_sub(usage.rpd),
                tpm.saturating_sub(usage.tpm)
            ),
            None => info!(
                "RPM remaining={} / RPD remaining={}",
                quota.rpm.saturating_sub(usage.rpm),
                quota.rpd.saturating_sub(usage.rpd)
            ),
        }

        if exceeded.is_empty() {
            return Ok(());
        }

        warn!("Waiting for rate limit reset...");
        clock.sleep(wait).await;
    }
}
