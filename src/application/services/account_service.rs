use super::optimistic_controller::{MutationHandle, OptimisticController};
use crate::application::ports::{MutationGateway, Notifier};
use crate::domain::value_objects::{EntityId, SameEntityPolicy};
use crate::infrastructure::http::AccountBalanceEndpoint;
use crate::infrastructure::store::ViewStore;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Account balances in minor units.
pub struct AccountService {
    balances: OptimisticController<i64>,
}

impl AccountService {
    pub fn new(
        gateway: Arc<dyn MutationGateway>,
        notifier: Arc<dyn Notifier>,
        policy: SameEntityPolicy,
    ) -> Self {
        Self {
            balances: OptimisticController::new(
                ViewStore::new(),
                Arc::new(AccountBalanceEndpoint),
                gateway,
                notifier,
                policy,
            ),
        }
    }

    pub fn balances(&self) -> &OptimisticController<i64> {
        &self.balances
    }

    pub fn load<I>(&self, accounts: I)
    where
        I: IntoIterator<Item = (EntityId, i64)>,
    {
        self.balances.store().hydrate(accounts);
    }

    pub fn balance(&self, account_id: &EntityId) -> Option<i64> {
        self.balances.current(account_id)
    }

    pub fn adjust_balance(
        &self,
        account_id: EntityId,
        delta: i64,
    ) -> Result<MutationHandle<i64>, AppError> {
        if delta == 0 {
            return Err(AppError::InvalidInput(
                "balance adjustment must not be zero".to_string(),
            ));
        }
        self.balances.adjust_optimistic(account_id, move |current| {
            current.checked_add(delta).ok_or_else(|| {
                AppError::InvalidInput(format!("cannot adjust balance {current} by {delta}"))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::accepting_gateway;
    use crate::infrastructure::notifications::ToastQueue;

    #[tokio::test]
    async fn confirmed_adjustment_sticks_without_further_requests() {
        // Exactly one request: confirmation never triggers a refetch.
        let service = AccountService::new(
            Arc::new(accepting_gateway(1)),
            Arc::new(ToastQueue::new(4)),
            SameEntityPolicy::Reject,
        );
        let account = EntityId::new("acc-1".into()).unwrap();
        service.load([(account.clone(), 10_000)]);

        service
            .adjust_balance(account.clone(), 100)
            .unwrap()
            .settled()
            .await
            .unwrap();

        assert_eq!(service.balance(&account), Some(10_100));
    }

    #[tokio::test]
    async fn zero_adjustment_is_refused() {
        let service = AccountService::new(
            Arc::new(accepting_gateway(0)),
            Arc::new(ToastQueue::new(4)),
            SameEntityPolicy::Reject,
        );
        service.load([(EntityId::from(1), 0)]);
        assert!(service.adjust_balance(EntityId::from(1), 0).is_err());
    }
}
