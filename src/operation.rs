//! Polling of long-running remote operations.
//!
//! A submitted operation moves through
//! `Submitted -> Polling -> {Completed, Failed, TimedOut}`. Time is read and
//! spent only through the injected [`Clock`].

use std::time::Duration;

use tracing::info;

use crate::backend::GenerativeBackend;
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::gemini::types::Operation;

/// State of a long-running operation as seen by the poller
#[derive(Debug)]
pub enum PollState {
    Submitted(Operation),
    Polling(Operation),
    Completed(Operation),
    Failed(serde_json::Value),
    TimedOut,
}

impl PollState {
    fn settle(operation: Operation) -> Self {
        if !operation.done {
            PollState::Polling(operation)
        } else if let Some(error) = operation.error {
            PollState::Failed(error)
        } else {
            PollState::Completed(operation)
        }
    }
}

/// Waits for an operation with a fixed interval and wall-clock limit
#[derive(Debug, Clone, Copy)]
pub struct OperationPoller {
    pub interval: Duration,
    pub timeout: Duration,
}

impl OperationPoller {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Drive `submitted` to a terminal state.
    ///
    /// Returns the completed operation; failure and timeout become errors.
    pub async fn wait(
        &self,
        backend: &dyn GenerativeBackend,
        clock: &dyn Clock,
        submitted: Operation,
    ) -> Result<Operation> {
        let started = clock.now_ms();
        let mut state = PollState::Submitted(submitted);

        loop {
            state = match state {
                PollState::Submitted(operation) => {
                    if !operation.name.is_empty() {
                        info!("Operation name: {}", operation.name);
                    }
                    PollState::settle(operation)
                }
                PollState::Polling(operation) => {
                    let elapsed = (clock.now_ms() - started).max(0) as u128;
                    if elapsed >= self.timeout.as_millis() {
                        PollState::TimedOut
                    } else {
                        clock.sleep(self.interval).await;
                        info!(
                            "Polling... (elapsed={}s)",
                            (clock.now_ms() - started).max(0) / 1000
                        );
                        let mut next = backend.get_operation(&operation.name).await?;
                        if next.name.is_empty() {
                            next.name = operation.name;
                        }
                        PollState::settle(next)
                    }
                }
                PollState::Completed(operation) => return Ok(operation),
                PollState::Failed(error) => return Err(Error::OperationFailed(error.to_string())),
                PollState::TimedOut => {
                    return Err(Error::OperationTimeout {
                        secs: self.timeout.as_secs(),
                    });
                }
            };
        }
    }
}
