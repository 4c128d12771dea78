use super::optimistic_controller::{MutationHandle, OptimisticController};
use crate::application::ports::{MutationGateway, Notifier};
use crate::domain::value_objects::{EntityId, SameEntityPolicy};
use crate::infrastructure::http::InventoryQuantityEndpoint;
use crate::infrastructure::store::ViewStore;
use crate::shared::error::AppError;
use std::sync::Arc;

pub struct InventoryService {
    quantities: OptimisticController<u32>,
}

impl InventoryService {
    pub fn new(
        gateway: Arc<dyn MutationGateway>,
        notifier: Arc<dyn Notifier>,
        policy: SameEntityPolicy,
    ) -> Self {
        Self {
            quantities: OptimisticController::new(
                ViewStore::new(),
                Arc::new(InventoryQuantityEndpoint),
                gateway,
                notifier,
                policy,
            ),
        }
    }

    pub fn quantities(&self) -> &OptimisticController<u32> {
        &self.quantities
    }

    pub fn load<I>(&self, items: I)
    where
        I: IntoIterator<Item = (EntityId, u32)>,
    {
        self.quantities.store().hydrate(items);
    }

    pub fn quantity(&self, item_id: &EntityId) -> Option<u32> {
        self.quantities.current(item_id)
    }

    pub fn set_quantity(
        &self,
        item_id: EntityId,
        quantity: u32,
    ) -> Result<MutationHandle<u32>, AppError> {
        self.quantities.apply_optimistic(item_id, quantity)
    }

    /// Restock (positive) or consume (negative). Stock never goes below zero.
    pub fn adjust_quantity(
        &self,
        item_id: EntityId,
        delta: i64,
    ) -> Result<MutationHandle<u32>, AppError> {
        self.quantities.adjust_optimistic(item_id, move |current| {
            i64::from(*current)
                .checked_add(delta)
                .and_then(|next| u32::try_from(next).ok())
                .ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "cannot adjust quantity {current} by {delta}"
                    ))
                })
        })
    }
}
