use crate::domain::value_objects::{EntityId, MutationId, MutationPhase, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MutationError;

/// One optimistic mutation, from the user's action until its request settles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MutationRecord<V> {
    pub id: MutationId,
    pub entity_type: ResourceKind,
    pub entity_id: EntityId,
    /// Value rendered right before the optimistic write.
    pub snapshot: V,
    pub requested: V,
    pub phase: MutationPhase,
    pub started_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl<V> MutationRecord<V> {
    pub fn new(entity_type: ResourceKind, entity_id: EntityId, snapshot: V, requested: V) -> Self {
        Self {
            id: MutationId::generate(),
            entity_type,
            entity_id,
            snapshot,
            requested,
            phase: MutationPhase::Idle,
            started_at: Utc::now(),
            settled_at: None,
        }
    }

    pub fn start(&mut self) -> Result<(), String> {
        self.advance(MutationPhase::Optimistic)
    }

    pub fn confirm(&mut self) -> Result<(), String> {
        self.advance(MutationPhase::Confirmed)
    }

    pub fn roll_back(&mut self) -> Result<(), String> {
        self.advance(MutationPhase::RolledBack)
    }

    fn advance(&mut self, next: MutationPhase) -> Result<(), String> {
        if !self.phase.can_transition_to(next) {
            return Err(format!(
                "mutation {} cannot move from {} to {}",
                self.id, self.phase, next
            ));
        }
        self.phase = next;
        if next.is_terminal() {
            self.settled_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    Confirmed,
    RolledBack { error: MutationError },
}

impl MutationOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, MutationOutcome::Confirmed)
    }

    pub fn error(&self) -> Option<&MutationError> {
        match self {
            MutationOutcome::Confirmed => None,
            MutationOutcome::RolledBack { error } => Some(error),
        }
    }
}

/// A finished mutation together with how it ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettledMutation<V> {
    pub record: MutationRecord<V>,
    pub outcome: MutationOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MutationRecord<bool> {
        MutationRecord::new(
            ResourceKind::FeatureFlag,
            EntityId::scoped("U1", "reports").unwrap(),
            false,
            true,
        )
    }

    #[test]
    fn confirmed_record_cannot_roll_back() {
        let mut record = record();
        record.start().unwrap();
        record.confirm().unwrap();
        assert!(record.settled_at.is_some());

        assert!(record.roll_back().is_err());
        assert!(record.confirm().is_err());
        assert_eq!(record.phase, MutationPhase::Confirmed);
    }

    #[test]
    fn idle_record_cannot_settle() {
        let mut record = record();
        assert!(record.confirm().is_err());
        assert_eq!(record.phase, MutationPhase::Idle);
        assert!(record.settled_at.is_none());
    }

    #[test]
    fn rolled_back_record_is_terminal() {
        let mut record = record();
        record.start().unwrap();
        record.roll_back().unwrap();
        assert!(record.start().is_err());
        assert_eq!(record.phase, MutationPhase::RolledBack);
    }
}
