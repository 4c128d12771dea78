use serde::{Deserialize, Serialize};
use std::fmt;

/// What happens when a mutation starts on an entity that already has one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameEntityPolicy {
    /// Refuse the new mutation; the view is left untouched.
    #[default]
    Reject,
    /// Let mutations overlap. Each snapshot is taken from whatever is rendered at call time,
    /// which may be another mutation's unconfirmed value, and the last settlement wins.
    Unguarded,
}

impl SameEntityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameEntityPolicy::Reject => "reject",
            SameEntityPolicy::Unguarded => "unguarded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(SameEntityPolicy::Reject),
            "unguarded" | "overlap" => Some(SameEntityPolicy::Unguarded),
            _ => None,
        }
    }
}

impl fmt::Display for SameEntityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
