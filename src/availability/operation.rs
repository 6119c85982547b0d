//! Cancellable operation handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A unit of work that can be cancelled explicitly or by a deadline.
///
/// Clones share the cancellation flag, so one clone can be handed to another
/// thread to cancel the work while the original drives it.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Operation {
    /// An operation with no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// An operation that expires `timeout` from now.
    ///
    /// A timeout too large to represent as an instant means no deadline.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// An operation that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// Cancel the operation and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the operation was cancelled or its deadline passed.
    pub fn is_done(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Time left before the deadline; `None` without a deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// When the operation expires, if ever.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
