//! Prelude for clockguard-pll-monitor.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use clockguard_pll_monitor::prelude::*;
//!
//! let mut monitor = PllMonitor::with_defaults(SoftwarePllRegister::locked());
//! let outcome = monitor.run_once();
//! assert_eq!(outcome.transition, Transition::Steady);
//! ```

pub use crate::config::{MonitorConfig, MonitorConfigBuilder};
pub use crate::detector::{Transition, detect_lock_loss};
pub use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity, TracingSink};
pub use crate::error::{PllMonitorError, PllMonitorResult};
pub use crate::escalator::{Escalation, FaultEscalator};
pub use crate::halt::{HaltRequest, ProcessHalt, SystemHalt};
pub use crate::monitor::{PllMonitor, PollOutcome};
pub use crate::shared::SharedPllMonitor;
pub use crate::source::{PllStatusSource, SoftwarePllRegister, read_pll_status};
pub use crate::state::{MonitorMetrics, MonitorPhase, MonitorState};
pub use crate::status::{Baseline, PllStatus, StatusEncoding};
