pub mod mutation_endpoint;
pub mod mutation_gateway;
pub mod notifier;

pub use mutation_endpoint::MutationEndpoint;
pub use mutation_gateway::{MutationGateway, MutationMethod, MutationRequest, MutationResponse};
pub use notifier::Notifier;
