use super::MutationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The backend's `{ success, data?, message? }` response, checked for shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApiEnvelope {
    Accepted {
        data: Option<Value>,
        message: Option<String>,
    },
    Rejected {
        message: Option<String>,
    },
}

impl ApiEnvelope {
    pub fn from_body(body: &str) -> Result<Self, MutationError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| MutationError::MalformedResponse(format!("body is not JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, MutationError> {
        let Value::Object(mut map) = value else {
            return Err(MutationError::MalformedResponse(
                "response envelope must be a JSON object".to_string(),
            ));
        };

        let success = match map.remove("success") {
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                return Err(MutationError::MalformedResponse(format!(
                    "`success` must be a boolean, got {other}"
                )));
            }
            None => {
                return Err(MutationError::MalformedResponse(
                    "response envelope is missing `success`".to_string(),
                ));
            }
        };

        let message = match map.remove("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(other) => {
                return Err(MutationError::MalformedResponse(format!(
                    "`message` must be a string, got {other}"
                )));
            }
        };

        if success {
            let data = map.remove("data").filter(|data| !data.is_null());
            Ok(ApiEnvelope::Accepted { data, message })
        } else {
            Ok(ApiEnvelope::Rejected { message })
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiEnvelope::Accepted { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ApiEnvelope::Accepted { message, .. } | ApiEnvelope::Rejected { message } => {
                message.as_deref()
            }
        }
    }

    /// Collapse into the settlement result; `status` is attached to rejections.
    pub fn into_result(self, status: Option<u16>) -> Result<Option<Value>, MutationError> {
        match self {
            ApiEnvelope::Accepted { data, .. } => Ok(data),
            ApiEnvelope::Rejected { message } => Err(MutationError::rejected(status, message)),
        }
    }
}
