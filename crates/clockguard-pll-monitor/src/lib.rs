//! # clockguard-pll-monitor
//!
//! Periodic lock-loss monitor for a clock-generation PLL.
//!
//! On every invocation the monitor reads the PLL status register, detects a
//! `Locked` to not-`Locked` edge, and escalates it:
//! - any unlocked status: one error-level diagnostic, the system keeps running
//! - reference lost (`0x3`): an error-level diagnostic, a fatal-level
//!   diagnostic carrying the raw code, then an unconditional system halt
//!
//! ## Collaborators
//!
//! - [`PllStatusSource`] - register access (stubbed by [`SoftwarePllRegister`])
//! - [`DiagnosticSink`] - diagnostic transport ([`TracingSink`] by default)
//! - [`SystemHalt`] - irreversible stop ([`ProcessHalt`] by default)
//!
//! Scheduling is the caller's concern. `run_once` takes `&mut self`; when
//! several contexts poll, use [`SharedPllMonitor`].
//!
//! ## State Machine
//!
//! ```text
//!            lock lost               reference lost
//! ┌─────────┐ ───────► ┌──────────┐  ┌─────────┐ ──────► ┌────────┐
//! │ Nominal │          │ Degraded │  │ Nominal │         │ Halted │
//! └─────────┘ ◄─────── └──────────┘  └─────────┘         └────────┘
//!             recovered (silent)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use clockguard_pll_monitor::prelude::*;
//!
//! let register = SoftwarePllRegister::shared(0x1);
//! let mut monitor = PllMonitor::new(
//!     MonitorConfig::default(),
//!     register.clone(),
//!     TracingSink,
//!     ProcessHalt,
//! )?;
//!
//! register.set_raw(0x2);
//! let outcome = monitor.run_once();
//! assert_eq!(outcome.transition, Transition::LockLost);
//!
//! // Already degraded: no further diagnostics.
//! let outcome = monitor.run_once();
//! assert_eq!(outcome.transition, Transition::StillUnlocked);
//! # Ok::<(), PllMonitorError>(())
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod detector;
pub mod diagnostic;
pub mod error;
pub mod escalator;
pub mod halt;
pub mod monitor;
pub mod prelude;
pub mod shared;
pub mod source;
pub mod state;
pub mod status;

pub use config::{MonitorConfig, MonitorConfigBuilder};
pub use detector::{Transition, detect_lock_loss};
pub use diagnostic::{
    Diagnostic, DiagnosticKind, DiagnosticSink, LOCK_LOSS_TRANSITION, Severity, TracingSink,
};
pub use error::{PllMonitorError, PllMonitorResult};
pub use escalator::{Escalation, FaultEscalator};
pub use halt::{HaltRequest, ProcessHalt, SystemHalt};
pub use monitor::{PllMonitor, PollOutcome};
pub use shared::SharedPllMonitor;
pub use source::{PllStatusSource, SoftwarePllRegister, read_pll_status};
pub use state::{MonitorMetrics, MonitorPhase, MonitorState};
pub use status::{Baseline, PllStatus, StatusEncoding};
