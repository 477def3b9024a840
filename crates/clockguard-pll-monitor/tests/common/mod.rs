//! Shared test doubles.
//!
//! The sink and the halt double write into one ordered event log, so tests
//! can check that the fatal record is issued before the halt call.

use std::sync::{Arc, Mutex};

use clockguard_pll_monitor::prelude::*;

/// One collaborator call, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Diagnostic(Diagnostic),
    Halt(HaltRequest),
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

#[derive(Debug)]
pub struct LoggedSink {
    log: EventLog,
}

impl DiagnosticSink for LoggedSink {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if let Ok(mut events) = self.log.lock() {
            events.push(Event::Diagnostic(diagnostic.clone()));
        }
    }
}

/// Halt double that records the request and returns.
#[derive(Debug)]
pub struct LoggedHalt {
    log: EventLog,
}

impl SystemHalt for LoggedHalt {
    fn halt(&mut self, request: &HaltRequest) {
        if let Ok(mut events) = self.log.lock() {
            events.push(Event::Halt(request.clone()));
        }
    }
}

/// A monitor wired to a software register and the shared event log.
pub struct Harness {
    pub register: Arc<SoftwarePllRegister>,
    pub monitor: PllMonitor<Arc<SoftwarePllRegister>, LoggedSink, LoggedHalt>,
    log: EventLog,
}

impl Harness {
    pub fn new(config: MonitorConfig) -> PllMonitorResult<Self> {
        let log = EventLog::default();
        let register = SoftwarePllRegister::shared(config.encoding.locked);
        let monitor = PllMonitor::new(
            config,
            Arc::clone(&register),
            LoggedSink {
                log: Arc::clone(&log),
            },
            LoggedHalt {
                log: Arc::clone(&log),
            },
        )?;
        Ok(Self {
            register,
            monitor,
            log,
        })
    }

    /// Put `raw` in the register and poll once.
    pub fn poll(&mut self, raw: u32) -> PollOutcome {
        self.register.set_raw(raw);
        self.monitor.run_once()
    }

    /// Every collaborator call so far.
    pub fn events(&self) -> Vec<Event> {
        self.log.lock().map(|events| events.clone()).unwrap_or_default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Diagnostic(diagnostic) => Some(diagnostic),
                Event::Halt(_) => None,
            })
            .collect()
    }

    pub fn halts(&self) -> Vec<HaltRequest> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Halt(request) => Some(request),
                Event::Diagnostic(_) => None,
            })
            .collect()
    }
}
