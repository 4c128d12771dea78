use crate::domain::value_objects::{EntityId, ResourceKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Transient, dismissible message about a settled mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub level: NotificationLevel,
    pub entity_type: ResourceKind,
    pub entity_id: EntityId,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub dismissed: bool,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        entity_type: ResourceKind,
        entity_id: EntityId,
        message: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            level,
            entity_type,
            entity_id,
            message,
            created_at: Utc::now(),
            dismissed: false,
        }
    }

    pub fn success(entity_type: ResourceKind, entity_id: EntityId, message: String) -> Self {
        Self::new(NotificationLevel::Success, entity_type, entity_id, message)
    }

    pub fn error(entity_type: ResourceKind, entity_id: EntityId, message: String) -> Self {
        Self::new(NotificationLevel::Error, entity_type, entity_id, message)
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}
