// Case context stack - which case annotations without an explicit handle belong to

use std::sync::{Mutex, MutexGuard};

/// Stack of running case ids. The top is the current case.
#[derive(Debug, Default)]
pub struct CaseContext {
    stack: Mutex<Vec<String>>,
}

impl CaseContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // A plain Vec of ids is always consistent, so a poisoned lock is still usable.
        self.stack.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Case started
    pub fn push(&self, id: &str) {
        self.lock().push(id.to_string());
    }

    /// Case finished. Removes the most recent entry for `id` wherever it sits.
    pub fn finish(&self, id: &str) {
        let mut stack = self.lock();
        if let Some(pos) = stack.iter().rposition(|current| current == id) {
            stack.remove(pos);
        }
    }

    /// Id of the case currently executing
    pub fn current(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    pub fn depth(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
