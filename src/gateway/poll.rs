//! Long-Running Operation Polling
//!
//! Drives a backend operation through the explicit state machine
//! `Submitted → Polling → Done | Failed`, suspending for a fixed interval
//! between status checks. The sleep capability is injected through the
//! `Clock` trait so the loop is testable without real time delays.
//!
//! There is no overall timeout and no attempt cap: a backend that never
//! completes stalls the caller until the future is dropped. Callers that
//! need bounded latency impose their own cancellation.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::{BackendGateway, OperationHandle, OperationStatus, VideoOperationOutput};
use crate::types::{Result, VeriscanError};

/// Injected sleep capability
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Observable state of a polled operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Submitted,
    Polling,
    Done,
    Failed,
}

/// Polls a long-running operation until the backend reports completion.
pub struct OperationPoller<C: Clock> {
    clock: C,
    interval: Duration,
}

impl OperationPoller<TokioClock> {
    /// Poller with the production clock
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(TokioClock, interval)
    }
}

impl<C: Clock> OperationPoller<C> {
    pub fn with_clock(clock: C, interval: Duration) -> Self {
        Self { clock, interval }
    }

    /// Drive the operation to completion.
    ///
    /// Checks status first, then sleeps between checks, so an
    /// already-completed operation returns without suspending.
    pub async fn wait(
        &self,
        gateway: &dyn BackendGateway,
        handle: &OperationHandle,
    ) -> Result<VideoOperationOutput> {
        let mut state = PollState::Submitted;

        loop {
            match gateway.check_operation(handle).await? {
                OperationStatus::Pending => {
                    if state == PollState::Submitted {
                        debug!(operation = %handle.name, "Operation pending, entering poll loop");
                    }
                    state = PollState::Polling;
                    self.clock.sleep(self.interval).await;
                }
                OperationStatus::Done(output) => {
                    debug!(operation = %handle.name, "Operation complete");
                    return Ok(output);
                }
                OperationStatus::Failed(message) => {
                    warn!(operation = %handle.name, "Operation failed: {}", message);
                    return Err(VeriscanError::GenerationFailed(message));
                }
            }
        }
    }
}
