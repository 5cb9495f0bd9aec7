//! Typed wrappers over the backend route table.

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::models::{
    GenerateRequest, GenerateResponse, HealthResponse, HumanizeRequest, HumanizeResponse,
    OracleRequest, QualityRequest, QualityResponse, SwitchProviderResponse,
};
use crate::domain::platform::Platform;

impl ApiClient {
    pub async fn generate_content(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ApiError> {
        self.post("content", request).await
    }

    pub async fn analyze_quality(&self, content: &str) -> Result<QualityResponse, ApiError> {
        let request = QualityRequest {
            content: content.to_string(),
        };
        self.post("analyze/quality", &request).await
    }

    pub async fn analyze_voice(&self, text: &str) -> Result<Value, ApiError> {
        self.post_query("analyze/voice", &[("text", text.to_string())])
            .await
    }

    /// `platform` defaults to the backend's `general` profile when absent.
    pub async fn research_seo(
        &self,
        topic: &str,
        platform: Option<&str>,
    ) -> Result<Value, ApiError> {
        let query = [
            ("topic", topic.to_string()),
            ("platform", platform.unwrap_or("general").to_string()),
        ];
        self.post_query("research/seo", &query).await
    }

    pub async fn humanize(
        &self,
        text: &str,
        voice_profile: Option<Value>,
    ) -> Result<HumanizeResponse, ApiError> {
        let request = HumanizeRequest {
            text: text.to_string(),
            voice_profile,
        };
        self.post("humanize", &request).await
    }

    pub async fn optimize_platform(
        &self,
        text: &str,
        platform: Platform,
    ) -> Result<Value, ApiError> {
        let query = [
            ("text", text.to_string()),
            ("platform", platform.as_str().to_string()),
        ];
        self.post_query("optimize/platform", &query).await
    }

    pub async fn consult_oracle(
        &self,
        question: &str,
        context: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request = OracleRequest {
            question: question.to_string(),
            context,
        };
        self.post("oracle/consult", &request).await
    }

    pub async fn suggest_visuals(
        &self,
        text: &str,
        platform: Option<Platform>,
    ) -> Result<Value, ApiError> {
        let mut query = vec![("text", text.to_string())];
        if let Some(platform) = platform {
            query.push(("platform", platform.as_str().to_string()));
        }
        self.post_query("visual/suggest", &query).await
    }

    pub async fn content_history(&self, content_id: i64) -> Result<Value, ApiError> {
        self.get(&format!("content/{content_id}/history")).await
    }

    pub async fn start_planning(&self, campaign_id: i64) -> Result<Value, ApiError> {
        self.post_query("planning/start", &[("campaign_id", campaign_id.to_string())])
            .await
    }

    pub async fn llm_providers(&self) -> Result<Value, ApiError> {
        self.get("llm/providers").await
    }

    pub async fn switch_llm(&self, provider: &str) -> Result<SwitchProviderResponse, ApiError> {
        self.post_query("llm/switch", &[("provider", provider.to_string())])
            .await
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        self.get("api/health").await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;

    use super::*;
    use crate::infra::http::ClientOptions;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.base_url(), &ClientOptions::default()).expect("client")
    }

    #[tokio::test]
    async fn humanize_sends_text_and_null_profile() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/humanize")
                    .json_body(serde_json::json!({"text": "stiff copy", "voice_profile": null}));
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"original":"stiff copy","humanized":"relaxed copy","applied":true}"#);
            })
            .await;

        let reply = client(&server).humanize("stiff copy", None).await?;
        assert_eq!(reply.humanized, "relaxed copy");
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn history_uses_content_id_in_path() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/content/42/history");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("[]");
            })
            .await;

        let history = client(&server).content_history(42).await?;
        assert_eq!(history, serde_json::json!([]));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn seo_defaults_platform_to_general() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/research/seo")
                    .query_param("topic", "launch")
                    .query_param("platform", "general");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{}");
            })
            .await;

        client(&server).research_seo("launch", None).await?;
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn switch_llm_passes_provider() -> Result<(), ApiError> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/llm/switch")
                    .query_param("provider", "openai");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"status":"success","provider":"openai"}"#);
            })
            .await;

        let reply = client(&server).switch_llm("openai").await?;
        assert_eq!(reply.provider.as_deref(), Some("openai"));
        mock.assert_async().await;
        Ok(())
    }
}
