//! Fault escalation for lock-loss edges.

use crate::config::MonitorConfig;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::halt::{HaltRequest, SystemHalt};
use crate::status::{PllStatus, StatusEncoding};

/// Outcome of escalating a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Escalation {
    /// `Locked` is not a lock loss; nothing was emitted.
    None,
    /// Lock lost for a non-fatal reason; logged, system keeps running.
    Degraded,
    /// Reference lost; logged at fatal severity and the halt was invoked.
    Halted,
}

/// Classifies lock-loss edges and drives the diagnostic and halt
/// collaborators.
///
/// # Ordering
///
/// For a reference loss the error record, then the fatal record, are emitted
/// before the halt collaborator is called.
#[derive(Debug, Clone, Copy)]
pub struct FaultEscalator<'a> {
    subsystem: &'a str,
    encoding: &'a StatusEncoding,
}

impl<'a> FaultEscalator<'a> {
    /// Create an escalator for the given subsystem tag and encoding.
    #[must_use]
    pub fn new(subsystem: &'a str, encoding: &'a StatusEncoding) -> Self {
        Self {
            subsystem,
            encoding,
        }
    }

    /// Create an escalator from a monitor configuration.
    #[must_use]
    pub fn from_config(config: &'a MonitorConfig) -> Self {
        Self::new(&config.subsystem, &config.encoding)
    }

    /// Escalate the status observed on a lock-loss edge.
    ///
    /// Must only be called when [`detect_lock_loss`](crate::detect_lock_loss)
    /// fired. Passing `Locked` emits nothing and returns [`Escalation::None`].
    pub fn escalate<S, H>(&self, current: PllStatus, sink: &mut S, halt: &mut H) -> Escalation
    where
        S: DiagnosticSink + ?Sized,
        H: SystemHalt + ?Sized,
    {
        if current.is_locked() {
            return Escalation::None;
        }

        let raw = current.to_raw(self.encoding);
        sink.emit(&Diagnostic::lock_loss(self.subsystem, current, raw));

        match current {
            PllStatus::ReferenceLost => {
                let fatal = Diagnostic::reference_lost(self.subsystem, raw);
                sink.emit(&fatal);
                halt.halt(&HaltRequest::from(&fatal));
                Escalation::Halted
            }
            PllStatus::Unlocked { .. } | PllStatus::Locked => Escalation::Degraded,
        }
    }
}
