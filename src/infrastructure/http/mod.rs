pub mod endpoints;
pub mod rest_gateway;

pub use endpoints::{
    AccountBalanceEndpoint, FeatureToggleEndpoint, InventoryQuantityEndpoint,
    NotificationReadEndpoint, RoleFeatureEndpoint,
};
pub use rest_gateway::RestMutationGateway;
