//! Port describing the backend calls the fan-out pipeline depends on.

use async_trait::async_trait;

use crate::infra::http::models::{
    GenerateRequest, GenerateResponse, HealthResponse, HumanizeResponse, QualityResponse,
};
use crate::infra::http::{ApiClient, ApiError};

#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError>;

    async fn analyze_quality(&self, content: &str) -> Result<QualityResponse, ApiError>;

    async fn humanize(&self, text: &str) -> Result<HumanizeResponse, ApiError>;

    async fn health(&self) -> Result<HealthResponse, ApiError>;
}

#[async_trait]
impl ContentApi for ApiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        self.generate_content(request).await
    }

    async fn analyze_quality(&self, content: &str) -> Result<QualityResponse, ApiError> {
        ApiClient::analyze_quality(self, content).await
    }

    async fn humanize(&self, text: &str) -> Result<HumanizeResponse, ApiError> {
        ApiClient::humanize(self, text, None).await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        ApiClient::health(self).await
    }
}
