use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    FeatureFlag,
    RoleFeature,
    InventoryQuantity,
    NotificationRead,
    AccountBalance,
    Custom(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::FeatureFlag => "feature_flag",
            ResourceKind::RoleFeature => "role_feature",
            ResourceKind::InventoryQuantity => "inventory_quantity",
            ResourceKind::NotificationRead => "notification_read",
            ResourceKind::AccountBalance => "account_balance",
            ResourceKind::Custom(value) => value.as_str(),
        }
    }

    /// Human wording used in notifications.
    pub fn label(&self) -> &str {
        match self {
            ResourceKind::FeatureFlag => "feature",
            ResourceKind::RoleFeature => "role feature",
            ResourceKind::InventoryQuantity => "inventory quantity",
            ResourceKind::NotificationRead => "notification",
            ResourceKind::AccountBalance => "account balance",
            ResourceKind::Custom(value) => value.as_str(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ResourceKind {
    fn from(value: &str) -> Self {
        match value {
            "feature_flag" => ResourceKind::FeatureFlag,
            "role_feature" => ResourceKind::RoleFeature,
            "inventory_quantity" => ResourceKind::InventoryQuantity,
            "notification_read" => ResourceKind::NotificationRead,
            "account_balance" => ResourceKind::AccountBalance,
            other => ResourceKind::Custom(other.to_string()),
        }
    }
}
