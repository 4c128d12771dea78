use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a single optimistic mutation.
///
/// `Idle -> Optimistic -> {Confirmed, RolledBack}`. Both settled phases are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPhase {
    Idle,
    Optimistic,
    Confirmed,
    RolledBack,
}

impl MutationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationPhase::Idle => "idle",
            MutationPhase::Optimistic => "optimistic",
            MutationPhase::Confirmed => "confirmed",
            MutationPhase::RolledBack => "rolled_back",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MutationPhase::Confirmed | MutationPhase::RolledBack)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MutationPhase::Optimistic)
    }

    pub fn can_transition_to(&self, next: MutationPhase) -> bool {
        matches!(
            (self, next),
            (MutationPhase::Idle, MutationPhase::Optimistic)
                | (MutationPhase::Optimistic, MutationPhase::Confirmed)
                | (MutationPhase::Optimistic, MutationPhase::RolledBack)
        )
    }
}

impl fmt::Display for MutationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
