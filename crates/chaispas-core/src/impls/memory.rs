//! In-memory log store (development / tests).

use crate::domain::DecisionRecord;
use crate::ports::{LogStore, StoreError};

/// Keeps the whole log in a Vec.
///
/// `set_available(false)` makes every load/store fail with
/// `StoreError::Unavailable`, which is how tests simulate an outage.
#[derive(Debug, Clone)]
pub struct InMemoryLogStore {
    records: Vec<DecisionRecord>,
    available: bool,
}

impl Default for InMemoryLogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<DecisionRecord>) -> Self {
        Self {
            records,
            available: true,
        }
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// What was last stored.
    pub fn snapshot(&self) -> Vec<DecisionRecord> {
        self.records.clone()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }
}

impl LogStore for InMemoryLogStore {
    fn load(&self) -> Result<Vec<DecisionRecord>, StoreError> {
        self.check_available()?;
        Ok(self.records.clone())
    }

    fn store(&mut self, records: &[DecisionRecord]) -> Result<(), StoreError> {
        self.check_available()?;
        self.records = records.to_vec();
        Ok(())
    }
}
