//! Request and response shapes of the backend routes this client consumes.
//!
//! Only the fields the client acts on are typed; everything else the backend
//! returns is tolerated and ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::platform::Platform;

pub const HEALTHY_STATUS: &str = "healthy";

fn default_applied() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateRequest {
    pub campaign_id: i64,
    pub title: String,
    pub original_text: String,
    pub platform: Platform,
    #[serde(default)]
    pub journalism_mode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub id: Option<i64>,
    pub generated_content: String,
    #[serde(default)]
    pub explanations: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QualityRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QualityResponse {
    pub quality_score: f64,
    #[serde(default)]
    pub quality_grade: Option<String>,
    #[serde(default)]
    pub ready_to_publish: Option<bool>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HumanizeRequest {
    pub text: String,
    pub voice_profile: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HumanizeResponse {
    pub humanized: String,
    #[serde(default = "default_applied")]
    pub applied: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub humanness_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OracleRequest {
    pub question: String,
    pub context: Option<Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY_STATUS
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwitchProviderResponse {
    pub status: String,
    #[serde(default)]
    pub provider: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_matches_backend_field_names() {
        let request = GenerateRequest {
            campaign_id: 1,
            title: "Launch".into(),
            original_text: "Body text".into(),
            platform: Platform::Linkedin,
            journalism_mode: false,
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "campaign_id": 1,
                "title": "Launch",
                "original_text": "Body text",
                "platform": "linkedin",
                "journalism_mode": false
            })
        );
    }

    #[test]
    fn quality_response_ignores_unknown_fields() {
        let body = r#"{"quality_score": 87.5, "quality_grade": "B+", "checks": {},
            "ready_to_publish": true}"#;
        let response: QualityResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(response.quality_score, 87.5);
        assert_eq!(response.quality_grade.as_deref(), Some("B+"));
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn humanize_response_defaults_to_applied() {
        let response: HumanizeResponse =
            serde_json::from_str(r#"{"humanized": "hi"}"#).expect("decode");
        assert!(response.applied);
    }

    #[test]
    fn health_requires_exact_sentinel() {
        let ok: HealthResponse = serde_json::from_str(r#"{"status":"healthy"}"#).expect("decode");
        let degraded: HealthResponse =
            serde_json::from_str(r#"{"status":"degraded"}"#).expect("decode");
        assert!(ok.is_healthy());
        assert!(!degraded.is_healthy());
    }
}
