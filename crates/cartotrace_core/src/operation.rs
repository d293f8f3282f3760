use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use thiserror::Error;
use tokio::sync::Notify;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Operation was superseded by a newer one")]
pub struct Superseded;

struct GateState {
    generation: AtomicU64,
    notify: Notify,
}

/// Hands out operation tokens. Beginning an operation invalidates the one in flight,
/// so the latest operation is the only one allowed to write shared view state.
#[derive(Clone)]
pub struct OperationGate {
    state: Arc<GateState>,
}

impl Default for OperationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationGate {
    pub fn new() -> Self {
        Self {
            state: Arc::new(GateState {
                generation: AtomicU64::new(0),
                notify: Notify::new(),
            }),
        }
    }

    pub fn begin(&self) -> OperationToken {
        let generation = self.advance();
        OperationToken {
            state: Arc::clone(&self.state),
            generation,
        }
    }

    /// Invalidates the in-flight operation without starting another one.
    pub fn cancel_current(&self) {
        self.advance();
    }

    fn advance(&self) -> u64 {
        let generation = self.state.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.state.notify.notify_waiters();
        generation
    }
}

pub struct OperationToken {
    state: Arc<GateState>,
    generation: u64,
}

impl OperationToken {
    pub fn is_current(&self) -> bool {
        self.state.generation.load(Ordering::Acquire) == self.generation
    }

    pub fn ensure_current(&self) -> Result<(), Superseded> {
        if self.is_current() {
            Ok(())
        } else {
            Err(Superseded)
        }
    }

    /// Resolves once a newer operation has begun or this one was cancelled.
    pub async fn superseded(&self) {
        loop {
            let notified = self.state.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if !self.is_current() {
                return;
            }

            notified.await;
        }
    }

    /// Drives `future` until it completes or this operation is superseded, whichever
    /// comes first. A superseded request is dropped rather than awaited.
    pub async fn until_superseded<F: Future>(&self, future: F) -> Result<F::Output, Superseded> {
        tokio::select! {
            output = future => Ok(output),
            _ = self.superseded() => Err(Superseded),
        }
    }

    /// Sleeps for `duration`, waking early when superseded. The token is checked again
    /// before returning, so callers never resume drawing for a stale operation.
    pub async fn pause(&self, duration: Duration) -> Result<(), Superseded> {
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = self.superseded() => {}
        }

        self.ensure_current()
    }
}
