pub mod entity_id;
pub mod mutation_id;
pub mod mutation_phase;
pub mod resource_kind;
pub mod resource_value;
pub mod same_entity_policy;

pub use entity_id::EntityId;
pub use mutation_id::MutationId;
pub use mutation_phase::MutationPhase;
pub use resource_kind::ResourceKind;
pub use resource_value::ResourceValue;
pub use same_entity_policy::SameEntityPolicy;
