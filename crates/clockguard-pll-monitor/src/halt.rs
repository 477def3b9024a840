//! System halt collaborator.
//!
//! A halt is a safety stop, not a recoverable operation. Production
//! implementations never return from [`SystemHalt::halt`]; the trait is still
//! declared with a unit return so that test doubles can record the call and
//! hand control back.

use core::fmt;

use crate::diagnostic::Diagnostic;
use crate::status::PllStatus;

/// Why the system is being halted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaltRequest {
    /// Subsystem tag of the failing component.
    pub subsystem: String,
    /// Status that caused the halt.
    pub status: PllStatus,
    /// Raw register code of `status`.
    pub raw: u32,
}

impl From<&Diagnostic> for HaltRequest {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            subsystem: diagnostic.subsystem.clone(),
            status: diagnostic.status,
            raw: diagnostic.raw,
        }
    }
}

impl fmt::Display for HaltRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] system halt: {} (current_state={:#x})",
            self.subsystem, self.status, self.raw
        )
    }
}

/// Irreversible system stop.
///
/// # Implementation Requirements
///
/// 1. `halt()` MUST NOT return in production builds
/// 2. `halt()` MUST NOT be cancellable once entered
/// 3. Implementations that do return are test doubles only
///
/// Production implementations should forward to a `-> !` function, as
/// [`ProcessHalt`] does with [`ProcessHalt::halt_now`].
///
/// # Returning Implementations
///
/// If `halt()` returns, `PllMonitor::run_once` still stores the status it
/// read and latches [`MonitorPhase::Halted`](crate::MonitorPhase::Halted).
/// The latch holds across later polls, including a relock, and is only
/// cleared by `PllMonitor::reinitialize`. Later polls never call `halt()`
/// again unless a new `Locked` to `ReferenceLost` edge is observed.
pub trait SystemHalt {
    /// Stop the system. Must not return outside of tests.
    fn halt(&mut self, request: &HaltRequest);
}

/// Halts by aborting the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessHalt;

impl ProcessHalt {
    /// Log the request and abort the process.
    pub fn halt_now(request: &HaltRequest) -> ! {
        tracing::error!(
            subsystem = %request.subsystem,
            status = %request.status,
            raw = format_args!("{:#x}", request.raw),
            "System halt requested"
        );
        std::process::abort()
    }
}

impl SystemHalt for ProcessHalt {
    fn halt(&mut self, request: &HaltRequest) {
        Self::halt_now(request)
    }
}
