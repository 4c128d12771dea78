pub mod account_service;
pub mod feature_service;
pub mod inventory_service;
pub mod notification_service;
pub mod optimistic_controller;

#[cfg(test)]
pub(crate) mod test_support;

pub use account_service::AccountService;
pub use feature_service::FeatureService;
pub use inventory_service::InventoryService;
pub use notification_service::NotificationInboxService;
pub use optimistic_controller::{MutationHandle, OptimisticController};
