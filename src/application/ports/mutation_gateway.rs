use crate::domain::entities::{ApiEnvelope, MutationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MutationMethod {
    Patch,
    Put,
}

impl MutationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationMethod::Patch => "PATCH",
            MutationMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for MutationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationRequest {
    pub method: MutationMethod,
    /// Path relative to the API base URL, starting with `/`.
    pub path: String,
    pub body: Value,
}

impl MutationRequest {
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: MutationMethod::Patch,
            path: path.into(),
            body,
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: MutationMethod::Put,
            path: path.into(),
            body,
        }
    }
}

/// A 2xx response whose body passed the envelope shape check.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResponse {
    pub status: u16,
    pub envelope: ApiEnvelope,
}

impl MutationResponse {
    pub fn into_result(self) -> Result<Option<Value>, MutationError> {
        self.envelope.into_result(Some(self.status))
    }
}

/// Sends a mutation to the backend. Transport failures, non-2xx statuses and unreadable
/// bodies come back as `Err`; a well-formed `success:false` comes back as `Ok`.
#[async_trait]
pub trait MutationGateway: Send + Sync {
    async fn send(&self, request: MutationRequest) -> Result<MutationResponse, MutationError>;
}
