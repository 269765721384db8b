use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Tracks how many mock calls are running at once and the peak observed.
///
/// Share one gauge across several providers to measure the dispatcher's
/// effective worker budget.
#[derive(Debug, Clone, Default)]
pub struct InFlightGauge {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl InFlightGauge {
    /// Fresh gauge at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a call as started. The call ends when the guard drops, including
    /// on panic or cancellation.
    #[must_use]
    pub fn enter(&self) -> InFlightGuard {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        InFlightGuard {
            current: Arc::clone(&self.current),
        }
    }

    /// Calls running right now.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    /// Highest concurrency seen since creation.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Decrements its [`InFlightGauge`] on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    current: Arc<AtomicUsize>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}
