use crate::domain::entities::MutationRecord;
use crate::domain::value_objects::MutationId;
use crate::shared::error::AppError;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Snapshots of in-flight mutations. A record leaves the ledger the moment it settles, so a
/// second confirm or rollback for the same id finds nothing and applies nothing.
pub struct MutationLedger<V> {
    records: Mutex<HashMap<MutationId, MutationRecord<V>>>,
}

impl<V> Default for MutationLedger<V> {
    fn default() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone> MutationLedger<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, record: MutationRecord<V>) -> Result<MutationId, AppError> {
        if !record.phase.is_pending() {
            return Err(AppError::ValidationError(format!(
                "only optimistic mutations can be tracked, {} is {}",
                record.id, record.phase
            )));
        }
        let id = record.id.clone();
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(id.clone(), record);
        Ok(id)
    }

    pub fn confirm(&self, id: &MutationId) -> Option<MutationRecord<V>> {
        let mut record = self.take(id)?;
        record.confirm().ok()?;
        Some(record)
    }

    /// Returns the settled record; its `snapshot` is the value to restore.
    pub fn rollback(&self, id: &MutationId) -> Option<MutationRecord<V>> {
        let mut record = self.take(id)?;
        record.roll_back().ok()?;
        Some(record)
    }

    pub fn pending(&self) -> Vec<MutationRecord<V>> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let mut items: Vec<_> = records.values().cloned().collect();
        items.sort_by_key(|record| record.started_at);
        items
    }

    fn take(&self, id: &MutationId) -> Option<MutationRecord<V>> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.remove(id)
    }
}
