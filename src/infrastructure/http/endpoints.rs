//! Request builders for the resources the pages mutate optimistically.

use crate::application::ports::{MutationEndpoint, MutationRequest};
use crate::domain::value_objects::{EntityId, ResourceKind};
use crate::shared::error::AppError;
use serde_json::json;

fn segment(value: &str) -> Result<&str, AppError> {
    if value.is_empty() || value.trim() != value || value.contains(['/', '?', '#']) {
        return Err(AppError::InvalidInput(format!(
            "`{value}` cannot be used as a path segment"
        )));
    }
    Ok(value)
}

fn scoped_parts(entity_id: &EntityId) -> Result<(&str, &str), AppError> {
    let (scope, id) = entity_id.split_scope().ok_or_else(|| {
        AppError::InvalidInput(format!("`{entity_id}` is not a scoped entity id"))
    })?;
    Ok((segment(scope)?, segment(id)?))
}

/// A feature flag for one user. Entity ids are `EntityId::scoped(user_id, feature)`.
#[derive(Debug, Clone, Default)]
pub struct FeatureToggleEndpoint;

impl MutationEndpoint<bool> for FeatureToggleEndpoint {
    fn kind(&self) -> ResourceKind {
        ResourceKind::FeatureFlag
    }

    fn request_for(
        &self,
        entity_id: &EntityId,
        _previous: &bool,
        next: &bool,
    ) -> Result<MutationRequest, AppError> {
        let (user_id, feature) = scoped_parts(entity_id)?;
        Ok(MutationRequest::patch(
            format!("/api/admin/features/{user_id}"),
            json!({ "feature": feature, "enabled": next }),
        ))
    }
}

/// A feature assigned to a role. Entity ids are `EntityId::scoped(feature_key, role)`.
#[derive(Debug, Clone, Default)]
pub struct RoleFeatureEndpoint;

impl MutationEndpoint<bool> for RoleFeatureEndpoint {
    fn kind(&self) -> ResourceKind {
        ResourceKind::RoleFeature
    }

    fn request_for(
        &self,
        entity_id: &EntityId,
        _previous: &bool,
        next: &bool,
    ) -> Result<MutationRequest, AppError> {
        let (feature_key, role) = scoped_parts(entity_id)?;
        Ok(MutationRequest::put(
            format!("/api/features/{feature_key}/assign/role/{role}"),
            json!({ "enabled": next }),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InventoryQuantityEndpoint;

impl MutationEndpoint<u32> for InventoryQuantityEndpoint {
    fn kind(&self) -> ResourceKind {
        ResourceKind::InventoryQuantity
    }

    fn request_for(
        &self,
        entity_id: &EntityId,
        _previous: &u32,
        next: &u32,
    ) -> Result<MutationRequest, AppError> {
        let item_id = segment(entity_id.as_str())?;
        Ok(MutationRequest::patch(
            format!("/api/inventory/{item_id}"),
            json!({ "quantity": next }),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationReadEndpoint;

impl MutationEndpoint<bool> for NotificationReadEndpoint {
    fn kind(&self) -> ResourceKind {
        ResourceKind::NotificationRead
    }

    fn request_for(
        &self,
        entity_id: &EntityId,
        _previous: &bool,
        next: &bool,
    ) -> Result<MutationRequest, AppError> {
        let notification_id = segment(entity_id.as_str())?;
        Ok(MutationRequest::patch(
            format!("/api/notifications/{notification_id}/read"),
            json!({ "read": next }),
        ))
    }
}

/// Balances are in minor units. The backend takes the adjustment, not the new total.
#[derive(Debug, Clone, Default)]
pub struct AccountBalanceEndpoint;

impl MutationEndpoint<i64> for AccountBalanceEndpoint {
    fn kind(&self) -> ResourceKind {
        ResourceKind::AccountBalance
    }

    fn request_for(
        &self,
        entity_id: &EntityId,
        previous: &i64,
        next: &i64,
    ) -> Result<MutationRequest, AppError> {
        let account_id = segment(entity_id.as_str())?;
        let delta = next.checked_sub(*previous).ok_or_else(|| {
            AppError::InvalidInput(format!("balance adjustment for `{account_id}` overflows"))
        })?;
        Ok(MutationRequest::patch(
            format!("/api/accounts/{account_id}/balance"),
            json!({ "delta": delta }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MutationMethod;

    #[test]
    fn feature_toggle_targets_the_user() {
        let request = FeatureToggleEndpoint
            .request_for(&EntityId::scoped("U1", "reports").unwrap(), &false, &true)
            .unwrap();
        assert_eq!(request.method, MutationMethod::Patch);
        assert_eq!(request.path, "/api/admin/features/U1");
        assert_eq!(request.body, json!({"feature": "reports", "enabled": true}));
    }

    #[test]
    fn feature_toggle_requires_a_scoped_id() {
        let err = FeatureToggleEndpoint
            .request_for(&EntityId::new("U1".into()).unwrap(), &false, &true)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn role_feature_uses_put() {
        let request = RoleFeatureEndpoint
            .request_for(&EntityId::scoped("billing", "manager").unwrap(), &true, &false)
            .unwrap();
        assert_eq!(request.method, MutationMethod::Put);
        assert_eq!(request.path, "/api/features/billing/assign/role/manager");
        assert_eq!(request.body, json!({"enabled": false}));
    }

    #[test]
    fn balance_sends_the_delta() {
        let request = AccountBalanceEndpoint
            .request_for(&EntityId::from(7), &2_500, &2_600)
            .unwrap();
        assert_eq!(request.path, "/api/accounts/7/balance");
        assert_eq!(request.body, json!({"delta": 100}));
    }

    #[test]
    fn balance_overflow_is_rejected() {
        let err = AccountBalanceEndpoint
            .request_for(&EntityId::from(7), &i64::MIN, &i64::MAX)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn ids_with_path_characters_are_rejected() {
        let err = InventoryQuantityEndpoint
            .request_for(&EntityId::new("../admin".into()).unwrap(), &1, &2)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn ids_with_surrounding_whitespace_are_rejected() {
        let padded = EntityId::new(" sku-1".into()).unwrap();
        let err = InventoryQuantityEndpoint
            .request_for(&padded, &1, &2)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let scoped = EntityId::scoped("U1", "reports ").unwrap();
        assert!(FeatureToggleEndpoint.request_for(&scoped, &false, &true).is_err());
    }

    #[test]
    fn notification_read_path() {
        let request = NotificationReadEndpoint
            .request_for(&EntityId::new("n-42".into()).unwrap(), &false, &true)
            .unwrap();
        assert_eq!(request.path, "/api/notifications/n-42/read");
        assert_eq!(request.body, json!({"read": true}));
    }
}
