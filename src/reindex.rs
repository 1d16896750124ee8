use crate::error::ReindexError;
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

/// Allows at most one corpus reindex at a time.
///
/// A second trigger while one is in flight is rejected, not queued. Rebuilding
/// an index from the corpus is idempotent, so the caller can simply retry later.
#[derive(Debug, Default)]
pub struct ReindexGuard {
    in_flight: AtomicBool,
}

/// Held for the duration of a reindex; releases the guard on drop.
#[derive(Debug)]
pub struct ReindexTicket<'a> {
    guard: &'a ReindexGuard,
}

impl Drop for ReindexTicket<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
    }
}

impl ReindexGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn try_begin(&self) -> Result<ReindexTicket<'_>, ReindexError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ReindexTicket { guard: self })
            .map_err(|_| ReindexError::AlreadyRunning)
    }

    /// Runs `job` unless another reindex is already running.
    pub fn run<T, E: Display>(
        &self,
        job: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, ReindexError> {
        let _ticket = self.try_begin()?;
        tracing::info!("Reindex started");
        let result = job().map_err(|e| ReindexError::Failed(e.to_string()));
        match &result {
            Ok(_) => tracing::info!("Reindex finished"),
            Err(e) => tracing::warn!("{}", e),
        }
        result
    }
}
