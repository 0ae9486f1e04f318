// Supplemental data - annotations made from inside a running test body
// Entries are keyed by case id and merged into the case record when it finishes.

pub mod context;
pub mod handle;

pub use context::CaseContext;
pub use handle::{Annotations, Annotator, CaseHandle};

use crate::diagnostics::{Diagnostics, FaultKind};
use crate::state::{Step, TestCase};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Annotations collected for one case
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplementalEntry {
    pub files: Vec<String>,
    pub desc: Option<String>,
    pub steps: Vec<Step>,
    /// Custom fields, keys already carry the `_` prefix
    pub custom: BTreeMap<String, Value>,
}

impl SupplementalEntry {
    /// Merge into a finished case.
    ///
    /// Files are added without repeating any path already on the case, steps
    /// are collapsed where adjacent ones repeat, and description and custom
    /// fields replace what the runner supplied.
    pub fn apply_to(self, case: &mut TestCase) {
        case.add_files(self.files);
        if let Some(desc) = self.desc {
            case.desc = Some(desc);
        }
        case.add_steps(self.steps);
        case.custom.extend(self.custom);
    }
}

pub type SupplementalMap = HashMap<String, SupplementalEntry>;

/// In-memory case id -> entry mapping for one run
#[derive(Debug)]
pub struct SupplementalStore {
    entries: Mutex<SupplementalMap>,
    diagnostics: Arc<Diagnostics>,
}

impl SupplementalStore {
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            diagnostics,
        }
    }

    /// Current mapping. Yields an empty mapping if the store is unavailable.
    pub fn get(&self) -> SupplementalMap {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(_) => {
                self.diagnostics
                    .record(FaultKind::Store, None, "supplemental store unavailable on read");
                HashMap::new()
            }
        }
    }

    /// Replace the mapping wholesale. Leaves the prior state if the store is unavailable.
    pub fn set(&self, mapping: SupplementalMap) {
        match self.entries.lock() {
            Ok(mut entries) => *entries = mapping,
            Err(_) => self
                .diagnostics
                .record(FaultKind::Store, None, "supplemental store unavailable on write"),
        }
    }

    /// Edit the entry for `id`, creating it on first use
    pub fn update<F>(&self, id: &str, edit: F)
    where
        F: FnOnce(&mut SupplementalEntry),
    {
        match self.entries.lock() {
            Ok(mut entries) => edit(entries.entry(id.to_string()).or_default()),
            Err(_) => self.diagnostics.record(
                FaultKind::Store,
                Some(id),
                "supplemental store unavailable, annotation dropped",
            ),
        }
    }

    /// Remove and return the entry for a finished case
    pub fn take(&self, id: &str) -> Option<SupplementalEntry> {
        match self.entries.lock() {
            Ok(mut entries) => {
                let entry = entries.remove(id);
                if entry.is_some() {
                    debug!(case_id = id, "merging supplemental data");
                }
                entry
            }
            Err(_) => {
                self.diagnostics.record(
                    FaultKind::Store,
                    Some(id),
                    "supplemental store unavailable, case reported without annotations",
                );
                None
            }
        }
    }

    pub fn clear(&self) {
        self.set(HashMap::new());
    }
}
