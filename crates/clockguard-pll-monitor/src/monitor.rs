//! The periodic PLL monitor.
//!
//! `PllMonitor` owns its state and its three collaborators. It is driven by
//! an external scheduler calling [`PllMonitor::run_once`]; `&mut self` gives
//! the single-writer discipline on `last_status` for free.

use crate::config::MonitorConfig;
use crate::detector::{Transition, detect_lock_loss};
use crate::diagnostic::{DiagnosticSink, TracingSink};
use crate::error::PllMonitorResult;
use crate::escalator::{Escalation, FaultEscalator};
use crate::halt::{ProcessHalt, SystemHalt};
use crate::source::{PllStatusSource, read_pll_status};
use crate::state::{MonitorMetrics, MonitorPhase, MonitorState};
use crate::status::{Baseline, PllStatus};

/// Result of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Status held before this poll.
    pub previous: PllStatus,
    /// Status read by this poll.
    pub current: PllStatus,
    /// Classification of the step.
    pub transition: Transition,
    /// What the escalator did, if the step was a lock-loss edge.
    pub escalation: Escalation,
}

impl PollOutcome {
    /// Check if this poll requested a system halt.
    #[must_use]
    pub fn halted(&self) -> bool {
        self.escalation == Escalation::Halted
    }
}

/// PLL lock-loss monitor.
///
/// # Example
///
/// ```rust
/// use clockguard_pll_monitor::prelude::*;
///
/// let register = SoftwarePllRegister::shared(0x1);
/// let mut monitor = PllMonitor::new(
///     MonitorConfig::default(),
///     register.clone(),
///     Vec::<Diagnostic>::new(),
///     ProcessHalt,
/// )?;
///
/// monitor.run_once();
/// assert_eq!(monitor.phase(), MonitorPhase::Nominal);
///
/// register.set_raw(0x0);
/// let outcome = monitor.run_once();
/// assert_eq!(outcome.transition, Transition::LockLost);
/// assert_eq!(monitor.sink().len(), 1);
/// assert_eq!(monitor.phase(), MonitorPhase::Degraded);
/// # Ok::<(), PllMonitorError>(())
/// ```
#[derive(Debug)]
pub struct PllMonitor<R, S = TracingSink, H = ProcessHalt> {
    config: MonitorConfig,
    source: R,
    sink: S,
    halt: H,
    state: MonitorState,
    metrics: MonitorMetrics,
}

impl<R: PllStatusSource> PllMonitor<R> {
    /// Create a monitor with the default configuration, logging through
    /// `tracing` and halting by aborting the process.
    #[must_use]
    pub fn with_defaults(source: R) -> Self {
        Self::from_parts(MonitorConfig::default(), source, TracingSink, ProcessHalt)
    }
}

impl<R, S, H> PllMonitor<R, S, H>
where
    R: PllStatusSource,
    S: DiagnosticSink,
    H: SystemHalt,
{
    /// Create a monitor.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: MonitorConfig, source: R, sink: S, halt: H) -> PllMonitorResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, source, sink, halt))
    }

    fn from_parts(config: MonitorConfig, source: R, sink: S, halt: H) -> Self {
        tracing::debug!(
            subsystem = %config.subsystem,
            baseline = %config.baseline,
            locked_code = format_args!("{:#x}", config.encoding.locked),
            reference_lost_code = format_args!("{:#x}", config.encoding.reference_lost),
            "PLL monitor initialized"
        );
        Self {
            state: MonitorState::new(config.baseline),
            config,
            source,
            sink,
            halt,
            metrics: MonitorMetrics::new(),
        }
    }

    /// Poll the PLL once.
    ///
    /// Reads the status, escalates if this poll is a lock-loss edge, then
    /// stores the status as `last_status`. The store happens whether or not
    /// escalation fired; after a real halt it is simply never observed.
    pub fn run_once(&mut self) -> PollOutcome {
        let previous = self.state.last_status();
        let current = read_pll_status(&mut self.source, &self.config.encoding);

        let escalation = if detect_lock_loss(previous, current) {
            FaultEscalator::from_config(&self.config).escalate(
                current,
                &mut self.sink,
                &mut self.halt,
            )
        } else {
            Escalation::None
        };
        if escalation == Escalation::Halted {
            self.state.latch_halt();
        }

        self.state.commit(current);

        let transition = Transition::classify(previous, current);
        self.metrics
            .record(transition, current.to_raw(&self.config.encoding));

        PollOutcome {
            previous,
            current,
            transition,
            escalation,
        }
    }

    /// Reseed `last_status` and clear the halt latch.
    ///
    /// Intended for the surrounding system after a recovery action. Metrics
    /// are kept.
    ///
    /// # Errors
    ///
    /// Returns an error, and leaves the monitor untouched, if an unlocked
    /// `baseline` uses a code the configured encoding classifies.
    pub fn reinitialize(&mut self, baseline: Baseline) -> PllMonitorResult<()> {
        if let Err(error) = baseline.validate(&self.config.encoding) {
            tracing::warn!(
                subsystem = %self.config.subsystem,
                baseline = %baseline,
                error = %error,
                "PLL monitor reinitialization rejected"
            );
            return Err(error);
        }
        tracing::info!(
            subsystem = %self.config.subsystem,
            previous = %self.state.last_status(),
            phase = %self.state.phase(),
            baseline = %baseline,
            "PLL monitor reinitialized"
        );
        self.state.reset(baseline);
        Ok(())
    }
}

impl<R, S, H> PllMonitor<R, S, H> {
    /// Status observed by the most recently completed poll.
    #[must_use]
    pub fn last_status(&self) -> PllStatus {
        self.state.last_status()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MonitorPhase {
        self.state.phase()
    }

    /// Monitor state snapshot.
    #[must_use]
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> MonitorMetrics {
        self.metrics
    }

    /// Reset all metrics.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Monitor configuration.
    #[must_use]
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Status register collaborator.
    #[must_use]
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Diagnostic sink collaborator.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Halt collaborator.
    #[must_use]
    pub fn halt(&self) -> &H {
        &self.halt
    }

    /// Take the monitor apart.
    #[must_use]
    pub fn into_parts(self) -> (MonitorConfig, R, S, H) {
        (self.config, self.source, self.sink, self.halt)
    }
}
