//! Monitor state, phase and metrics.
//!
//! `MonitorState` is owned by exactly one `PllMonitor`; the only writer is
//! `PllMonitor::run_once` (plus the explicit `reinitialize` call).

use crate::detector::Transition;
use crate::status::{Baseline, PllStatus};

/// Conceptual monitor phase.
///
/// ```text
///            LockLost             ReferenceLost
///  Nominal ───────────► Degraded   Nominal ─────► Halted (terminal)
///     ▲                    │
///     └──── Recovered ─────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonitorPhase {
    /// Last observed status was `Locked`.
    #[default]
    Nominal,
    /// Last observed status was not `Locked`.
    Degraded,
    /// The halt collaborator was invoked.
    Halted,
}

impl MonitorPhase {
    /// Check if the phase is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Halted)
    }

    /// Get the phase as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nominal => "Nominal",
            Self::Degraded => "Degraded",
            Self::Halted => "Halted",
        }
    }
}

impl core::fmt::Display for MonitorPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State carried across monitor invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorState {
    /// Status observed by the most recently completed poll.
    last_status: PllStatus,
    /// Latched once the halt collaborator has been invoked.
    halted: bool,
}

impl MonitorState {
    /// Create a state seeded with `baseline`.
    #[must_use]
    pub fn new(baseline: Baseline) -> Self {
        Self {
            last_status: baseline.status(),
            halted: false,
        }
    }

    /// Status observed by the most recently completed poll.
    #[must_use]
    pub fn last_status(&self) -> PllStatus {
        self.last_status
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MonitorPhase {
        if self.halted {
            MonitorPhase::Halted
        } else if self.last_status.is_locked() {
            MonitorPhase::Nominal
        } else {
            MonitorPhase::Degraded
        }
    }

    pub(crate) fn commit(&mut self, status: PllStatus) {
        self.last_status = status;
    }

    pub(crate) fn latch_halt(&mut self) {
        self.halted = true;
    }

    pub(crate) fn reset(&mut self, baseline: Baseline) {
        *self = Self::new(baseline);
    }
}

impl Default for MonitorState {
    fn default() -> Self {
        Self::new(Baseline::Locked)
    }
}

/// Monitor counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorMetrics {
    /// Total number of polls.
    pub polls: u64,
    /// Lock-loss edges of either class.
    pub lock_loss_events: u64,
    /// Reference-lost edges (halts requested).
    pub fatal_events: u64,
    /// Returns from unlocked to locked.
    pub recoveries: u64,
    /// Raw code read by the last poll.
    pub last_raw: Option<u32>,
}

impl MonitorMetrics {
    /// Create a new metrics instance with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one poll.
    pub fn record(&mut self, transition: Transition, raw: u32) {
        self.polls = self.polls.saturating_add(1);
        self.last_raw = Some(raw);
        match transition {
            Transition::LockLost => {
                self.lock_loss_events = self.lock_loss_events.saturating_add(1);
            }
            Transition::ReferenceLost => {
                self.lock_loss_events = self.lock_loss_events.saturating_add(1);
                self.fatal_events = self.fatal_events.saturating_add(1);
            }
            Transition::Recovered => {
                self.recoveries = self.recoveries.saturating_add(1);
            }
            Transition::Steady | Transition::StillUnlocked => {}
        }
    }

    /// Reset all metrics.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
