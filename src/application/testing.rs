//! Scripted backend used by the application-layer unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::content_api::ContentApi;
use crate::domain::platform::Platform;
use crate::infra::http::ApiError;
use crate::infra::http::models::{
    GenerateRequest, GenerateResponse, HealthResponse, HumanizeResponse, QualityResponse,
};

#[derive(Debug, Default)]
pub(crate) struct ScriptedApi {
    failing_generation: HashSet<Platform>,
    empty_generation: HashSet<Platform>,
    failing_humanize: HashSet<Platform>,
    failing_quality: bool,
    quality_score: Option<f64>,
    health_status: Option<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub generate_calls: AtomicUsize,
    pub quality_calls: AtomicUsize,
    pub humanize_calls: AtomicUsize,
}

fn network_error() -> ApiError {
    ApiError::Network {
        message: "connection refused".to_string(),
    }
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            health_status: Some("healthy".to_string()),
            ..Self::default()
        }
    }

    pub fn failing_generation(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.failing_generation.extend(platforms);
        self
    }

    pub fn empty_generation(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.empty_generation.extend(platforms);
        self
    }

    /// Humanization fails for text tagged `[platform]`.
    pub fn failing_humanize(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.failing_humanize.extend(platforms);
        self
    }

    pub fn failing_quality(mut self) -> Self {
        self.failing_quality = true;
        self
    }

    pub fn with_quality_score(mut self, score: f64) -> Self {
        self.quality_score = Some(score);
        self
    }

    pub fn with_health(mut self, status: Option<&str>) -> Self {
        self.health_status = status.map(str::to_string);
        self
    }

    pub fn with_delay_ms(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }

    async fn call<T>(&self, counter: &AtomicUsize, reply: impl FnOnce() -> T) -> T {
        counter.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        reply()
    }
}

#[async_trait]
impl ContentApi for ScriptedApi {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        self.call(&self.generate_calls, || {
            let platform = request.platform;
            if self.failing_generation.contains(&platform) {
                return Err(network_error());
            }
            let generated_content = if self.empty_generation.contains(&platform) {
                String::new()
            } else {
                format!("[{platform}] {}", request.original_text)
            };
            Ok(GenerateResponse {
                id: None,
                generated_content,
                explanations: None,
            })
        })
        .await
    }

    async fn analyze_quality(&self, _content: &str) -> Result<QualityResponse, ApiError> {
        self.call(&self.quality_calls, || {
            if self.failing_quality {
                return Err(ApiError::HttpStatus {
                    status: 500,
                    body: "quality agent crashed".to_string(),
                });
            }
            Ok(QualityResponse {
                quality_score: self.quality_score.unwrap_or(75.0),
                quality_grade: None,
                ready_to_publish: None,
                recommendations: Vec::new(),
            })
        })
        .await
    }

    async fn humanize(&self, text: &str) -> Result<HumanizeResponse, ApiError> {
        self.call(&self.humanize_calls, || {
            let failing = self
                .failing_humanize
                .iter()
                .any(|platform| text.starts_with(&format!("[{platform}]")));
            if failing {
                return Err(network_error());
            }
            Ok(HumanizeResponse {
                humanized: format!("{text} (humanized)"),
                applied: true,
                reason: None,
                humanness_score: None,
            })
        })
        .await
    }

    async fn health(&self) -> Result<HealthResponse, ApiError> {
        match &self.health_status {
            Some(status) => Ok(HealthResponse {
                status: status.clone(),
                service: None,
            }),
            None => Err(network_error()),
        }
    }
}
