use super::optimistic_controller::{MutationHandle, OptimisticController};
use crate::application::ports::{MutationGateway, Notifier};
use crate::domain::value_objects::{EntityId, SameEntityPolicy};
use crate::infrastructure::http::{FeatureToggleEndpoint, RoleFeatureEndpoint};
use crate::infrastructure::store::ViewStore;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Feature management page: per-user flags and per-role assignments.
pub struct FeatureService {
    user_flags: OptimisticController<bool>,
    role_flags: OptimisticController<bool>,
}

impl FeatureService {
    pub fn new(
        gateway: Arc<dyn MutationGateway>,
        notifier: Arc<dyn Notifier>,
        policy: SameEntityPolicy,
    ) -> Self {
        Self {
            user_flags: OptimisticController::new(
                ViewStore::new(),
                Arc::new(FeatureToggleEndpoint),
                gateway.clone(),
                notifier.clone(),
                policy,
            ),
            role_flags: OptimisticController::new(
                ViewStore::new(),
                Arc::new(RoleFeatureEndpoint),
                gateway,
                notifier,
                policy,
            ),
        }
    }

    pub fn user_flags(&self) -> &OptimisticController<bool> {
        &self.user_flags
    }

    pub fn role_flags(&self) -> &OptimisticController<bool> {
        &self.role_flags
    }

    /// Load `(user_id, feature, enabled)` rows as fetched from the backend.
    pub fn load_user_flags<'a, I>(&self, rows: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, bool)>,
    {
        let values = rows
            .into_iter()
            .map(|(user_id, feature, enabled)| {
                EntityId::scoped(user_id, feature)
                    .map(|id| (id, enabled))
                    .map_err(AppError::ValidationError)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.user_flags.store().hydrate(values);
        Ok(())
    }

    /// Load `(feature_key, role, enabled)` rows.
    pub fn load_role_flags<'a, I>(&self, rows: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, bool)>,
    {
        let values = rows
            .into_iter()
            .map(|(feature_key, role, enabled)| {
                EntityId::scoped(feature_key, role)
                    .map(|id| (id, enabled))
                    .map_err(AppError::ValidationError)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.role_flags.store().hydrate(values);
        Ok(())
    }

    pub fn is_enabled(&self, user_id: &str, feature: &str) -> Option<bool> {
        let id = EntityId::scoped(user_id, feature).ok()?;
        self.user_flags.current(&id)
    }

    pub fn toggle_for_user(
        &self,
        user_id: &str,
        feature: &str,
        enabled: bool,
    ) -> Result<MutationHandle<bool>, AppError> {
        let id = EntityId::scoped(user_id, feature).map_err(AppError::InvalidInput)?;
        self.user_flags.apply_optimistic(id, enabled)
    }

    pub fn assign_to_role(
        &self,
        feature_key: &str,
        role: &str,
        enabled: bool,
    ) -> Result<MutationHandle<bool>, AppError> {
        let id = EntityId::scoped(feature_key, role).map_err(AppError::InvalidInput)?;
        self.role_flags.apply_optimistic(id, enabled)
    }
}
