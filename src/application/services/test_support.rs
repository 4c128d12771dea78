use crate::application::ports::{MutationGateway, MutationRequest, MutationResponse};
use crate::domain::entities::{ApiEnvelope, MutationError};
use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

mock! {
    pub Gateway {}

    #[async_trait]
    impl MutationGateway for Gateway {
        async fn send(&self, request: MutationRequest) -> Result<MutationResponse, MutationError>;
    }
}

pub fn accepted_with(data: Option<Value>) -> Result<MutationResponse, MutationError> {
    Ok(MutationResponse {
        status: 200,
        envelope: ApiEnvelope::Accepted {
            data,
            message: None,
        },
    })
}

pub fn rejected_with(message: Option<&str>) -> Result<MutationResponse, MutationError> {
    Ok(MutationResponse {
        status: 200,
        envelope: ApiEnvelope::Rejected {
            message: message.map(str::to_string),
        },
    })
}

/// A gateway that accepts every request exactly `times` times.
pub fn accepting_gateway(times: usize) -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway
        .expect_send()
        .times(times)
        .returning(|_| accepted_with(None));
    gateway
}
