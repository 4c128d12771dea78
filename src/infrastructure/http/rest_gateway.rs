use crate::application::ports::{
    MutationGateway, MutationMethod, MutationRequest, MutationResponse,
};
use crate::domain::entities::{ApiEnvelope, MutationError};
use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use tracing::debug;

pub const ROLE_HEADER: &str = "X-User-Role";

/// `reqwest` adapter for the backend's JSON envelope API.
#[derive(Clone)]
pub struct RestMutationGateway {
    base_url: String,
    bearer_token: Option<String>,
    role: Option<String>,
    http: reqwest::Client,
}

impl RestMutationGateway {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let trimmed = config.base_url.trim();
        if trimmed.is_empty() {
            return Err(AppError::ConfigurationError(
                "API base_url is empty".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            bearer_token: config
                .bearer_token
                .clone()
                .filter(|value| !value.trim().is_empty()),
            role: config.role.clone().filter(|value| !value.trim().is_empty()),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: MutationMethod, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let method = match method {
            MutationMethod::Patch => Method::PATCH,
            MutationMethod::Put => Method::PUT,
        };
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.bearer_token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        if let Some(role) = &self.role {
            builder = builder.header(ROLE_HEADER, role);
        }
        builder
    }
}

#[async_trait]
impl MutationGateway for RestMutationGateway {
    async fn send(&self, request: MutationRequest) -> Result<MutationResponse, MutationError> {
        debug!(method = %request.method, path = %request.path, "sending mutation");
        let resp = self
            .request(request.method, &request.path)
            .json(&request.body)
            .send()
            .await
            .map_err(|err| MutationError::Network(err.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| MutationError::Network(err.to_string()))?;

        if !status.is_success() {
            let message = ApiEnvelope::from_body(&body)
                .ok()
                .and_then(|envelope| envelope.message().map(str::to_string));
            return Err(MutationError::rejected(Some(status.as_u16()), message));
        }

        let envelope = ApiEnvelope::from_body(&body)?;
        Ok(MutationResponse {
            status: status.as_u16(),
            envelope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            bearer_token: Some("token-123".into()),
            role: Some("admin".into()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn base_url_is_trimmed() {
        let gateway = RestMutationGateway::new(&config(" http://localhost:3000/ ")).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:3000");
    }

    #[test]
    fn empty_base_url_is_a_configuration_error() {
        let err = RestMutationGateway::new(&config("  ")).err().unwrap();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn requests_carry_auth_and_role_headers() {
        let gateway = RestMutationGateway::new(&config("http://localhost:3000")).unwrap();
        let request = gateway
            .request(MutationMethod::Patch, "/api/admin/features/U1")
            .build()
            .unwrap();

        assert_eq!(request.method(), Method::PATCH);
        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/api/admin/features/U1"
        );
        assert_eq!(
            request.headers().get("Authorization").unwrap(),
            "Bearer token-123"
        );
        assert_eq!(request.headers().get(ROLE_HEADER).unwrap(), "admin");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_network_error() {
        let gateway = RestMutationGateway::new(&config("http://127.0.0.1:9")).unwrap();
        let err = gateway
            .send(MutationRequest::patch(
                "/api/inventory/sku-1",
                serde_json::json!({"quantity": 1}),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, MutationError::Network(_)));
    }
}
