//! Serialized monitor handle.
//!
//! `PllMonitor::run_once` must never run concurrently with itself. When more
//! than one execution context can trigger a poll (a periodic task plus an
//! on-demand health check, for example), wrap the monitor in a
//! `SharedPllMonitor`: every call takes the same lock, so polls are
//! serialized and `last_status` keeps a single writer.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::diagnostic::{DiagnosticSink, TracingSink};
use crate::error::PllMonitorResult;
use crate::halt::{ProcessHalt, SystemHalt};
use crate::monitor::{PllMonitor, PollOutcome};
use crate::source::PllStatusSource;
use crate::state::{MonitorMetrics, MonitorPhase};
use crate::status::{Baseline, PllStatus};

/// Cloneable handle to a monitor behind a mutex.
#[derive(Debug)]
pub struct SharedPllMonitor<R, S = TracingSink, H = ProcessHalt> {
    inner: Arc<Mutex<PllMonitor<R, S, H>>>,
}

impl<R, S, H> Clone for SharedPllMonitor<R, S, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R, S, H> SharedPllMonitor<R, S, H>
where
    R: PllStatusSource,
    S: DiagnosticSink,
    H: SystemHalt,
{
    /// Wrap `monitor`.
    #[must_use]
    pub fn new(monitor: PllMonitor<R, S, H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(monitor)),
        }
    }

    /// Poll the PLL once, serialized against every other handle.
    pub fn run_once(&self) -> PollOutcome {
        self.inner.lock().run_once()
    }

    /// Reseed `last_status` and clear the halt latch.
    ///
    /// # Errors
    ///
    /// Returns an error if `baseline` is invalid for the configured encoding.
    pub fn reinitialize(&self, baseline: Baseline) -> PllMonitorResult<()> {
        self.inner.lock().reinitialize(baseline)
    }

    /// Status observed by the most recently completed poll.
    #[must_use]
    pub fn last_status(&self) -> PllStatus {
        self.inner.lock().last_status()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MonitorPhase {
        self.inner.lock().phase()
    }

    /// Metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> MonitorMetrics {
        self.inner.lock().metrics()
    }

    /// Run `f` with exclusive access to the monitor.
    pub fn with<T>(&self, f: impl FnOnce(&mut PllMonitor<R, S, H>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
