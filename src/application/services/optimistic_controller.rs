use crate::application::ports::{
    MutationEndpoint, MutationGateway, MutationRequest, MutationResponse, Notifier,
};
use crate::domain::entities::{
    MutationError, MutationOutcome, MutationRecord, Notification, SettledMutation,
};
use crate::domain::value_objects::{
    EntityId, MutationId, ResourceKind, ResourceValue, SameEntityPolicy,
};
use crate::infrastructure::store::{MutationLedger, ViewStore};
use crate::shared::error::AppError;
use crate::shared::metrics::{MutationMetrics, MutationMetricsSnapshot};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Applies user changes to view state before the backend confirms them, and puts the previous
/// value back if the backend does not.
///
/// The write into the [`ViewStore`] happens synchronously inside [`apply_optimistic`]; the
/// request runs on a spawned task. On success the optimistic value is kept as is: the server's
/// response payload is not merged back into view state.
///
/// [`apply_optimistic`]: OptimisticController::apply_optimistic
pub struct OptimisticController<V: ResourceValue> {
    inner: Arc<ControllerInner<V>>,
}

impl<V: ResourceValue> Clone for OptimisticController<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<V: ResourceValue> {
    store: ViewStore<V>,
    ledger: MutationLedger<V>,
    endpoint: Arc<dyn MutationEndpoint<V>>,
    gateway: Arc<dyn MutationGateway>,
    notifier: Arc<dyn Notifier>,
    policy: SameEntityPolicy,
    metrics: MutationMetrics,
}

/// Returned as soon as the optimistic write is done.
pub struct MutationHandle<V> {
    id: MutationId,
    entity_id: EntityId,
    task: JoinHandle<Result<SettledMutation<V>, AppError>>,
}

impl<V> MutationHandle<V> {
    pub fn id(&self) -> &MutationId {
        &self.id
    }

    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    pub fn is_settled(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the request to settle and the view to be reconciled.
    pub async fn settled(self) -> Result<SettledMutation<V>, AppError> {
        self.task
            .await
            .map_err(|err| AppError::Internal(format!("mutation {} aborted: {err}", self.id)))?
    }
}

impl<V: ResourceValue> OptimisticController<V> {
    pub fn new(
        store: ViewStore<V>,
        endpoint: Arc<dyn MutationEndpoint<V>>,
        gateway: Arc<dyn MutationGateway>,
        notifier: Arc<dyn Notifier>,
        policy: SameEntityPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                store,
                ledger: MutationLedger::new(),
                endpoint,
                gateway,
                notifier,
                policy,
                metrics: MutationMetrics::new(),
            }),
        }
    }

    pub fn store(&self) -> &ViewStore<V> {
        &self.inner.store
    }

    pub fn kind(&self) -> ResourceKind {
        self.inner.endpoint.kind()
    }

    pub fn policy(&self) -> SameEntityPolicy {
        self.inner.policy
    }

    pub fn current(&self, entity_id: &EntityId) -> Option<V> {
        self.inner.store.get(entity_id)
    }

    /// In-flight mutations, oldest first.
    pub fn pending(&self) -> Vec<MutationRecord<V>> {
        self.inner.ledger.pending()
    }

    pub fn metrics(&self) -> MutationMetricsSnapshot {
        self.inner.metrics.snapshot()
    }

    /// Render `next` for `entity_id` right away and send it to the backend.
    ///
    /// Must be called from within a tokio runtime. Errors returned here mean nothing was
    /// written; request failures are reported through the handle and the notifier instead.
    pub fn apply_optimistic(
        &self,
        entity_id: EntityId,
        next: V,
    ) -> Result<MutationHandle<V>, AppError> {
        self.adjust_optimistic(entity_id, move |_| Ok(next))
    }

    /// Like [`apply_optimistic`](Self::apply_optimistic), with the next value derived from the
    /// one currently rendered (e.g. adding a delta to a balance).
    pub fn adjust_optimistic<F>(
        &self,
        entity_id: EntityId,
        derive: F,
    ) -> Result<MutationHandle<V>, AppError>
    where
        F: FnOnce(&V) -> Result<V, AppError>,
    {
        let runtime = Handle::try_current().map_err(|err| {
            AppError::Internal(format!("optimistic mutations need a tokio runtime: {err}"))
        })?;
        let inner = &self.inner;

        let (snapshot, next, request) = inner
            .store
            .begin_write(&entity_id, inner.policy, |current| {
                let next = derive(current)?;
                let request = inner.endpoint.request_for(&entity_id, current, &next)?;
                Ok((next, request))
            })
            .inspect_err(|err| {
                if matches!(err, AppError::Conflict(_)) {
                    inner.metrics.record_rejected_in_flight();
                }
            })?;

        let mut record =
            MutationRecord::new(inner.endpoint.kind(), entity_id.clone(), snapshot, next);
        let tracked = record
            .start()
            .map_err(AppError::Internal)
            .and_then(|()| inner.ledger.save(record.clone()));
        let mutation_id = match tracked {
            Ok(id) => id,
            Err(err) => {
                inner.store.finish_write(&entity_id, Some(record.snapshot));
                return Err(err);
            }
        };

        debug!(
            mutation_id = %mutation_id,
            entity_type = %record.entity_type,
            entity_id = %entity_id,
            from = ?record.snapshot,
            to = ?record.requested,
            "optimistic write applied"
        );

        let task_inner = Arc::clone(inner);
        let task_id = mutation_id.clone();
        let task_entity = entity_id.clone();
        let task = runtime.spawn(async move {
            task_inner
                .settle(task_id, task_entity, request)
                .await
        });

        Ok(MutationHandle {
            id: mutation_id,
            entity_id,
            task,
        })
    }
}

impl<V: ResourceValue> ControllerInner<V> {
    async fn settle(
        &self,
        id: MutationId,
        entity_id: EntityId,
        request: MutationRequest,
    ) -> Result<SettledMutation<V>, AppError> {
        let result = self
            .gateway
            .send(request)
            .await
            .and_then(MutationResponse::into_result);

        match result {
            // Response data is not merged into view state.
            Ok(_data) => self.confirm(&id, &entity_id),
            Err(error) => self.roll_back(&id, &entity_id, error),
        }
    }

    fn confirm(
        &self,
        id: &MutationId,
        entity_id: &EntityId,
    ) -> Result<SettledMutation<V>, AppError> {
        let record = self
            .ledger
            .confirm(id)
            .ok_or_else(|| AppError::Conflict(format!("mutation {id} already settled")))?;
        self.store.finish_write(entity_id, None);
        self.metrics.record_confirmed();

        info!(
            mutation_id = %id,
            entity_type = %record.entity_type,
            entity_id = %entity_id,
            "mutation confirmed"
        );
        self.notifier.notify(Notification::success(
            record.entity_type.clone(),
            entity_id.clone(),
            format!(
                "Updated {} {} to {}.",
                record.entity_type.label(),
                entity_id,
                record.requested.describe()
            ),
        ));

        Ok(SettledMutation {
            record,
            outcome: MutationOutcome::Confirmed,
        })
    }

    fn roll_back(
        &self,
        id: &MutationId,
        entity_id: &EntityId,
        error: MutationError,
    ) -> Result<SettledMutation<V>, AppError> {
        let record = self
            .ledger
            .rollback(id)
            .ok_or_else(|| AppError::Conflict(format!("mutation {id} already settled")))?;
        self.store
            .finish_write(entity_id, Some(record.snapshot.clone()));
        self.metrics.record_rolled_back();

        warn!(
            mutation_id = %id,
            entity_type = %record.entity_type,
            entity_id = %entity_id,
            error = %error,
            "mutation rolled back"
        );
        self.notifier.notify(Notification::error(
            record.entity_type.clone(),
            entity_id.clone(),
            format!(
                "Could not update {} {}: {}. Reverted to {}.",
                record.entity_type.label(),
                entity_id,
                error.user_message(),
                record.snapshot.describe()
            ),
        ));

        Ok(SettledMutation {
            record,
            outcome: MutationOutcome::RolledBack { error },
        })
    }
}
