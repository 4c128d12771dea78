use super::optimistic_controller::{MutationHandle, OptimisticController};
use crate::application::ports::{MutationGateway, Notifier};
use crate::domain::value_objects::{EntityId, SameEntityPolicy};
use crate::infrastructure::http::NotificationReadEndpoint;
use crate::infrastructure::store::ViewStore;
use crate::shared::error::AppError;
use std::sync::Arc;

/// Read/unread state of the user's inbox notifications.
pub struct NotificationInboxService {
    read_flags: OptimisticController<bool>,
}

impl NotificationInboxService {
    pub fn new(
        gateway: Arc<dyn MutationGateway>,
        notifier: Arc<dyn Notifier>,
        policy: SameEntityPolicy,
    ) -> Self {
        Self {
            read_flags: OptimisticController::new(
                ViewStore::new(),
                Arc::new(NotificationReadEndpoint),
                gateway,
                notifier,
                policy,
            ),
        }
    }

    pub fn read_flags(&self) -> &OptimisticController<bool> {
        &self.read_flags
    }

    pub fn load<I>(&self, items: I)
    where
        I: IntoIterator<Item = (EntityId, bool)>,
    {
        self.read_flags.store().hydrate(items);
    }

    pub fn unread_count(&self) -> usize {
        self.read_flags
            .store()
            .values()
            .values()
            .filter(|read| !**read)
            .count()
    }

    pub fn mark_read(&self, id: EntityId) -> Result<MutationHandle<bool>, AppError> {
        self.read_flags.apply_optimistic(id, true)
    }

    pub fn mark_unread(&self, id: EntityId) -> Result<MutationHandle<bool>, AppError> {
        self.read_flags.apply_optimistic(id, false)
    }
}
