//! Optimistic mutation layer for the Tally business-management client.
//!
//! Pages render a change as soon as the user makes it, send it to the REST backend, and revert
//! the rendered value with an error toast when the backend does not accept it.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use application::services::{MutationHandle, OptimisticController};
pub use domain::entities::{MutationError, MutationOutcome, Notification, SettledMutation};
pub use domain::value_objects::{EntityId, ResourceKind, ResourceValue, SameEntityPolicy};
pub use shared::{AppConfig, AppError, Result};
pub use state::AppState;
