//! Diagnostic records and the sinks that receive them.
//!
//! Records carry a fixed, greppable message plus structured fields
//! (subsystem tag, transition kind, severity, status) so log-analysis tools
//! can match on fields rather than parse text.

use core::fmt;

use crate::status::PllStatus;

/// Transition tag attached to every lock-loss record.
pub const LOCK_LOSS_TRANSITION: &str = "LOCK->UNLOCK";

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Degraded but the system keeps running.
    Error,
    /// The system is about to halt.
    Fatal,
}

impl Severity {
    /// Get the severity as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a diagnostic record reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The PLL left the locked state.
    LockLoss,
    /// The PLL lost its reference signal.
    ReferenceLost,
}

/// A single diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Record severity.
    pub severity: Severity,
    /// What the record reports.
    pub kind: DiagnosticKind,
    /// Subsystem tag, e.g. `CLK`.
    pub subsystem: String,
    /// Status observed on the poll that produced the record.
    pub status: PllStatus,
    /// Raw register code of `status`.
    pub raw: u32,
}

impl Diagnostic {
    /// Error-level record for a locked to unlocked edge.
    #[must_use]
    pub fn lock_loss(subsystem: &str, status: PllStatus, raw: u32) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::LockLoss,
            subsystem: subsystem.to_string(),
            status,
            raw,
        }
    }

    /// Fatal-level record for a reference loss.
    #[must_use]
    pub fn reference_lost(subsystem: &str, raw: u32) -> Self {
        Self {
            severity: Severity::Fatal,
            kind: DiagnosticKind::ReferenceLost,
            subsystem: subsystem.to_string(),
            status: PllStatus::ReferenceLost,
            raw,
        }
    }

    /// Transition tag of this record.
    #[must_use]
    pub fn transition(&self) -> &'static str {
        match self.kind {
            DiagnosticKind::LockLoss | DiagnosticKind::ReferenceLost => LOCK_LOSS_TRANSITION,
        }
    }

    /// Check if this record is fatal.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::LockLoss => {
                write!(f, "[{}] PLL status changed: LOCK -> UNLOCK", self.subsystem)
            }
            DiagnosticKind::ReferenceLost => write!(
                f,
                "[{}] Fatal Error: System PLL lost lock, current_state={:#x}",
                self.subsystem, self.raw
            ),
        }
    }
}

/// Destination for diagnostic records.
///
/// `emit` must at least have issued the record by the time it returns: the
/// monitor calls the halt collaborator right after emitting a fatal record.
pub trait DiagnosticSink {
    /// Emit one record.
    fn emit(&mut self, diagnostic: &Diagnostic);
}

/// Collects records in memory, in emission order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.push(diagnostic.clone());
    }
}

/// Sink that forwards records to `tracing`.
///
/// `tracing` has no fatal level, so fatal records are `ERROR` events with
/// `severity = "fatal"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        tracing::error!(
            subsystem = %diagnostic.subsystem,
            transition = diagnostic.transition(),
            severity = diagnostic.severity.as_str(),
            status = %diagnostic.status,
            raw = format_args!("{:#x}", diagnostic.raw),
            "{diagnostic}"
        );
    }
}
