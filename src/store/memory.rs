//! In-memory store, lost on exit

use std::sync::{Arc, Mutex};

use super::{StoreError, StoredDay, TimeStore};

/// Store whose clones share one record.
///
/// Keeping a clone lets a caller observe exactly what was last written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    day: Option<StoredDay>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated as if a previous run had saved `day`
    pub fn with_day(day: StoredDay) -> Self {
        let store = Self::default();
        if let Ok(mut inner) = store.inner.lock() {
            inner.day = Some(day);
        }
        store
    }

    /// Last written record, `None` if nothing was ever written
    pub fn snapshot(&self) -> Option<StoredDay> {
        self.inner.lock().ok().and_then(|inner| inner.day)
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.inner.lock().map(|inner| inner.writes).unwrap_or(0)
    }
}

impl TimeStore for MemoryStore {
    fn load(&self) -> Result<StoredDay, StoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|e| StoreError::Invalid(format!("memory store poisoned: {}", e)))?;
        inner.day.unwrap_or_default().validate()
    }

    fn save(&mut self, day: &StoredDay) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| StoreError::Invalid(format!("memory store poisoned: {}", e)))?;
        inner.day = Some(*day);
        inner.writes += 1;
        Ok(())
    }
}
