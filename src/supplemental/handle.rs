// Annotation API exposed to test code

use crate::diagnostics::{Diagnostics, FaultKind};
use crate::state::Step;
use crate::state::result::custom_key;
use crate::supplemental::{CaseContext, SupplementalStore};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// State shared between the reporter and every handle it gives out
#[derive(Debug)]
pub struct Annotations {
    enabled: AtomicBool,
    pub store: SupplementalStore,
    pub context: CaseContext,
    pub diagnostics: Arc<Diagnostics>,
}

impl Annotations {
    pub fn new(diagnostics: Arc<Diagnostics>) -> Self {
        Self {
            enabled: AtomicBool::new(false),
            store: SupplementalStore::new(diagnostics.clone()),
            context: CaseContext::new(),
            diagnostics,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Drop everything left over from a previous run
    pub fn reset(&self) {
        self.store.clear();
        self.context.clear();
    }

    pub fn attach_file(&self, id: &str, path: &Path) {
        if !self.is_enabled() {
            return;
        }
        let path = path.to_string_lossy().into_owned();
        self.store.update(id, |entry| entry.files.push(path));
    }

    pub fn set_custom(&self, id: &str, name: &str, value: Value) {
        if !self.is_enabled() {
            return;
        }
        let key = custom_key(name);
        self.store.update(id, |entry| {
            entry.custom.insert(key, value);
        });
    }

    pub fn set_description(&self, id: &str, text: &str) {
        if !self.is_enabled() {
            return;
        }
        self.store.update(id, |entry| entry.desc = Some(text.to_string()));
    }

    pub fn add_step(&self, id: &str, step: Option<Step>) {
        if !self.is_enabled() {
            return;
        }
        let Some(step) = step else {
            debug!(case_id = id, "ignoring empty step");
            return;
        };
        self.store.update(id, |entry| entry.steps.push(step));
    }
}

/// Annotations for one specific case, returned when the case starts
#[derive(Debug, Clone)]
pub struct CaseHandle {
    id: String,
    annotations: Arc<Annotations>,
}

impl CaseHandle {
    pub(crate) fn new(id: impl Into<String>, annotations: Arc<Annotations>) -> Self {
        Self {
            id: id.into(),
            annotations,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attach a file path to the case
    pub fn attach_file(&self, path: impl AsRef<Path>) {
        self.annotations.attach_file(&self.id, path.as_ref());
    }

    /// Set a custom field, reported as `_<name>`
    pub fn set_custom(&self, name: &str, value: impl Into<Value>) {
        self.annotations.set_custom(&self.id, name, value.into());
    }

    /// Set the case description
    pub fn set_description(&self, text: &str) {
        self.annotations.set_description(&self.id, text);
    }

    /// Record a step. `None` is ignored.
    pub fn add_step(&self, step: impl Into<Option<Step>>) {
        self.annotations.add_step(&self.id, step.into());
    }
}

/// Annotations routed to whichever case is currently executing
#[derive(Debug, Clone)]
pub struct Annotator {
    annotations: Arc<Annotations>,
}

impl Annotator {
    pub(crate) fn new(annotations: Arc<Annotations>) -> Self {
        Self { annotations }
    }

    /// Handle for the current case, if one is running
    pub fn current(&self) -> Option<CaseHandle> {
        self.annotations
            .context
            .current()
            .map(|id| CaseHandle::new(id, self.annotations.clone()))
    }

    fn with_current<F>(&self, operation: &str, annotate: F)
    where
        F: FnOnce(&CaseHandle),
    {
        if !self.annotations.is_enabled() {
            return;
        }
        match self.current() {
            Some(handle) => annotate(&handle),
            None => self.annotations.diagnostics.record(
                FaultKind::Annotation,
                None,
                format!("{} called with no case running, annotation dropped", operation),
            ),
        }
    }

    pub fn attach_file(&self, path: impl AsRef<Path>) {
        self.with_current("attach_file", |handle| handle.attach_file(path));
    }

    pub fn set_custom(&self, name: &str, value: impl Into<Value>) {
        self.with_current("set_custom", |handle| handle.set_custom(name, value));
    }

    pub fn set_description(&self, text: &str) {
        self.with_current("set_description", |handle| handle.set_description(text));
    }

    pub fn add_step(&self, step: impl Into<Option<Step>>) {
        self.with_current("add_step", |handle| handle.add_step(step));
    }
}
