use crate::application::ports::{MutationGateway, Notifier};
use crate::application::services::{
    AccountService, FeatureService, InventoryService, NotificationInboxService,
};
use crate::infrastructure::http::RestMutationGateway;
use crate::infrastructure::notifications::ToastQueue;
use crate::shared::config::AppConfig;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Everything a page needs: one service per mutable resource, sharing a gateway and a toast queue.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub toasts: Arc<ToastQueue>,
    pub features: Arc<FeatureService>,
    pub inventory: Arc<InventoryService>,
    pub notifications: Arc<NotificationInboxService>,
    pub accounts: Arc<AccountService>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigurationError)?;
        let gateway: Arc<dyn MutationGateway> = Arc::new(RestMutationGateway::new(&config.api)?);
        Ok(Self::with_gateway(config, gateway))
    }

    pub fn from_env() -> Result<Self, AppError> {
        Self::new(AppConfig::from_env())
    }

    /// Build the state around any gateway implementation.
    pub fn with_gateway(config: AppConfig, gateway: Arc<dyn MutationGateway>) -> Self {
        let policy = config.mutation.same_entity_policy;
        let toasts = Arc::new(ToastQueue::new(config.mutation.toast_capacity));
        let notifier: Arc<dyn Notifier> = toasts.clone();

        Self {
            features: Arc::new(FeatureService::new(
                gateway.clone(),
                notifier.clone(),
                policy,
            )),
            inventory: Arc::new(InventoryService::new(
                gateway.clone(),
                notifier.clone(),
                policy,
            )),
            notifications: Arc::new(NotificationInboxService::new(
                gateway.clone(),
                notifier.clone(),
                policy,
            )),
            accounts: Arc::new(AccountService::new(gateway, notifier, policy)),
            toasts,
            config: Arc::new(config),
        }
    }
}
