use super::mutation_gateway::MutationRequest;
use crate::domain::value_objects::{EntityId, ResourceKind};
use crate::shared::error::AppError;

/// Maps a change on one kind of resource to the backend call that persists it.
pub trait MutationEndpoint<V>: Send + Sync {
    fn kind(&self) -> ResourceKind;

    fn request_for(
        &self,
        entity_id: &EntityId,
        previous: &V,
        next: &V,
    ) -> Result<MutationRequest, AppError>;
}
