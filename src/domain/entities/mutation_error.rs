use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a mutation request failed to settle successfully. Every variant triggers the same
/// rollback; they differ only in what the user is told.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum MutationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected the change{}{}", status_suffix(.status), message_suffix(.message))]
    ServerRejected {
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl MutationError {
    pub fn rejected(status: Option<u16>, message: Option<String>) -> Self {
        MutationError::ServerRejected {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Short reason suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            MutationError::Network(_) => "the server could not be reached".to_string(),
            MutationError::ServerRejected {
                message: Some(message),
                ..
            } => message.clone(),
            MutationError::ServerRejected { message: None, .. } => {
                "the server rejected the change".to_string()
            }
            MutationError::MalformedResponse(_) => {
                "the server sent an unexpected response".to_string()
            }
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" (HTTP {code})"))
        .unwrap_or_default()
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|msg| format!(": {msg}"))
        .unwrap_or_default()
}
