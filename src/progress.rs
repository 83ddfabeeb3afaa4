//! Progress reporting and cancellation for classification runs.
//!
//! The engine reports coarse checkpoints to a [`ProgressObserver`]; the
//! algorithms themselves never see it. Reporting is purely observational and
//! never changes which phases run.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::error::{ClassifyError, Result};

/// Receives progress updates from a run.
pub trait ProgressObserver: Send + Sync {
    /// Called with a completion percentage in `0..=100`.
    fn on_progress(&self, percent: u8);

    /// Called with a human-readable status line.
    fn on_message(&self, message: &str);
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _percent: u8) {}

    fn on_message(&self, _message: &str) {}
}

/// Forwards updates to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn on_progress(&self, percent: u8) {
        info!("progress {percent}%");
    }

    fn on_message(&self, message: &str) {
        info!("{message}");
    }
}

/// Wraps an observer and keeps the reported percentage non-decreasing.
pub struct ProgressReporter {
    observer: Arc<dyn ProgressObserver>,
    last: Mutex<u8>,
}

impl ProgressReporter {
    /// Create a reporter that starts at 0%.
    pub fn new(observer: Arc<dyn ProgressObserver>) -> Self {
        ProgressReporter {
            observer,
            last: Mutex::new(0),
        }
    }

    /// Report a checkpoint. Values above 100 are clamped; values below the
    /// last reported percentage are ignored.
    pub fn checkpoint(&self, percent: u8) {
        let percent = percent.min(100);
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if percent < *last {
            return;
        }
        *last = percent;
        self.observer.on_progress(percent);
    }

    /// Forward a status line.
    pub fn message<S: AsRef<str>>(&self, message: S) {
        self.observer.on_message(message.as_ref());
    }
}

/// Cooperative cancellation flag, checked by the engine between phases.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next phase boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`ClassifyError::Cancelled`] if cancellation was requested.
    pub fn check(&self, phase: &str) -> Result<()> {
        if self.is_cancelled() {
            return Err(ClassifyError::cancelled(format!("cancelled before {phase}")));
        }
        Ok(())
    }
}
