// Fault channel for errors the reporter recovers from
// Lifecycle callbacks never fail; whatever they swallow is recorded here.

pub mod types;

pub use types::{Fault, FaultKind};

use std::sync::Mutex;
use tracing::warn;

/// Collected faults for the current run
#[derive(Debug, Default)]
pub struct Diagnostics {
    faults: Mutex<Vec<Fault>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fault and log it
    pub fn record(&self, kind: FaultKind, case_id: Option<&str>, message: impl Into<String>) {
        let fault = Fault {
            kind,
            case_id: case_id.map(str::to_string),
            message: message.into(),
        };

        warn!(
            kind = kind.as_str(),
            case_id = fault.case_id.as_deref().unwrap_or("-"),
            "{}",
            fault.message
        );

        match self.faults.lock() {
            Ok(mut faults) => faults.push(fault),
            Err(poisoned) => poisoned.into_inner().push(fault),
        }
    }

    /// Snapshot of every fault recorded so far
    pub fn faults(&self) -> Vec<Fault> {
        match self.faults.lock() {
            Ok(faults) => faults.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn clear(&self) {
        match self.faults.lock() {
            Ok(mut faults) => faults.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}
