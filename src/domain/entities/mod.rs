pub mod api_envelope;
pub mod mutation_error;
pub mod mutation_record;
pub mod notification;

pub use api_envelope::ApiEnvelope;
pub use mutation_error::MutationError;
pub use mutation_record::{MutationOutcome, MutationRecord, SettledMutation};
pub use notification::{Notification, NotificationLevel};
