//! Data the pages would have fetched before the user starts editing.

use tally_client::EntityId;

/// `(user_id, feature, enabled)`
pub const USER_FEATURES: &[(&str, &str, bool)] = &[
    ("U1", "reports", false),
    ("U1", "payroll", true),
    ("U2", "reports", true),
    ("U2", "inventory", false),
];

/// `(feature_key, role, enabled)`
pub const ROLE_FEATURES: &[(&str, &str, bool)] = &[
    ("billing", "manager", true),
    ("billing", "staff", false),
];

pub const ACCOUNTS: &[(&str, i64)] = &[("acc-checking", 250_000), ("acc-savings", 1_000_000)];

pub const INVENTORY: &[(&str, u32)] = &[("sku-100", 12), ("sku-200", 0)];

pub fn accounts() -> Vec<(EntityId, i64)> {
    ACCOUNTS
        .iter()
        .map(|(id, balance)| (EntityId::new(id.to_string()).unwrap(), *balance))
        .collect()
}

pub fn inventory() -> Vec<(EntityId, u32)> {
    INVENTORY
        .iter()
        .map(|(id, quantity)| (EntityId::new(id.to_string()).unwrap(), *quantity))
        .collect()
}

/// Notifications 1..=3; only the last one has been read.
pub fn notifications() -> Vec<(EntityId, bool)> {
    vec![
        (EntityId::from(1), false),
        (EntityId::from(2), false),
        (EntityId::from(3), true),
    ]
}
