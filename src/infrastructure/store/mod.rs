pub mod mutation_ledger;
pub mod view_store;

pub use mutation_ledger::MutationLedger;
pub use view_store::{ViewEntry, ViewStore};
