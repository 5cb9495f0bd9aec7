//! Best-effort multi-platform generation with chained quality and
//! humanization passes.
//!
//! A failing platform never aborts its siblings: every call settles into a
//! per-platform record, and callers only see the batch once all calls have
//! settled.

use std::sync::Arc;

use futures::future::join_all;
use metrics::counter;
use serde::Serialize;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::application::content_api::ContentApi;
use crate::domain::draft::Draft;
use crate::domain::error::DomainError;
use crate::domain::platform::Platform;
use crate::domain::results::{BatchResults, PlatformResult, QualityResult, QualityResults};
use crate::infra::http::ApiError;
use crate::infra::http::models::{GenerateRequest, GenerateResponse};

const NO_CONTENT: &str = "no content generated";

#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub campaign_id: i64,
    pub journalism_mode: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            campaign_id: 1,
            journalism_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformFailure {
    pub platform: Platform,
    pub error: String,
}

/// What a sequential humanization pass did to each platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HumanizeReport {
    pub humanized: Vec<Platform>,
    pub failed: Vec<PlatformFailure>,
}

impl HumanizeReport {
    pub fn any_succeeded(&self) -> bool {
        !self.humanized.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanizeOutcome {
    pub report: HumanizeReport,
    /// Present when at least one platform was humanized.
    pub qualities: Option<QualityResults>,
}

#[derive(Clone)]
pub struct FanOutEngine {
    api: Arc<dyn ContentApi>,
    options: GenerationOptions,
}

impl std::fmt::Debug for FanOutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOutEngine")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl FanOutEngine {
    pub fn new(api: Arc<dyn ContentApi>, options: GenerationOptions) -> Self {
        Self { api, options }
    }

    pub fn api(&self) -> &Arc<dyn ContentApi> {
        &self.api
    }

    /// Issues one generation call per distinct platform, concurrently.
    ///
    /// Input is validated before anything is sent. The returned map holds
    /// exactly one entry per distinct requested platform, in request order.
    pub async fn generate_for_all_platforms(
        &self,
        title: &str,
        body: &str,
        platforms: &[Platform],
    ) -> Result<BatchResults, DomainError> {
        Draft::new(title, body).validate()?;
        let platforms = distinct(platforms);
        if platforms.is_empty() {
            return Err(DomainError::validation("at least one platform must be selected"));
        }

        let batch_id = Uuid::new_v4();
        let span = info_span!("generate_batch", %batch_id, platforms = platforms.len());
        let calls = platforms.iter().map(|&platform| {
            let request = GenerateRequest {
                campaign_id: self.options.campaign_id,
                title: title.to_string(),
                original_text: body.to_string(),
                platform,
                journalism_mode: self.options.journalism_mode,
            };
            async move {
                let outcome = self.api.generate(&request).await;
                settle_generation(platform, outcome)
            }
        });

        let results: BatchResults = join_all(calls).instrument(span).await.into_iter().collect();
        info!(
            %batch_id,
            succeeded = results.success_count(),
            total = results.len(),
            "Generation batch settled"
        );
        Ok(results)
    }

    /// Scores every platform that has content, concurrently. Platforms
    /// without content get a zero score carrying their original error and
    /// cost no call.
    pub async fn analyze_multiple_qualities(&self, results: &BatchResults) -> QualityResults {
        let calls = results.iter().map(|result| async move {
            let platform = result.platform;
            let Some(text) = result.generated_text.as_deref() else {
                let error = result.error.clone().unwrap_or_else(|| NO_CONTENT.to_string());
                return QualityResult::unscored(platform, error);
            };
            match self.api.analyze_quality(text).await {
                Ok(response) => {
                    debug!(%platform, score = response.quality_score, "Quality scored");
                    QualityResult::scored(platform, response.quality_score, response.quality_grade)
                }
                Err(err) => {
                    counter!("kusi_quality_failure_total", "platform" => platform.as_str())
                        .increment(1);
                    warn!(%platform, kind = ?err.kind(), error = %err, "Quality analysis failed");
                    QualityResult::unscored(platform, err.to_string())
                }
            }
        });
        join_all(calls).await.into_iter().collect()
    }

    /// Humanizes each platform's content one at a time so the humanization
    /// backend sees a single request at once. A failure leaves that
    /// platform's text untouched and moves on.
    pub async fn humanize_all(&self, results: &mut BatchResults) -> HumanizeReport {
        let mut report = HumanizeReport::default();
        for result in results.iter_mut() {
            let platform = result.platform;
            let Some(text) = result.generated_text.clone() else {
                continue;
            };
            let failure = match self.api.humanize(&text).await {
                Ok(response) if response.applied && !response.humanized.trim().is_empty() => {
                    result.apply_humanized(response.humanized);
                    report.humanized.push(platform);
                    continue;
                }
                Ok(response) => response
                    .reason
                    .unwrap_or_else(|| "humanization was not applied".to_string()),
                Err(err) => err.to_string(),
            };
            counter!("kusi_humanize_failure_total", "platform" => platform.as_str()).increment(1);
            warn!(%platform, error = %failure, "Humanization failed");
            report.failed.push(PlatformFailure {
                platform,
                error: failure,
            });
        }
        report
    }

    /// [`Self::humanize_all`] followed, when anything changed, by a fresh
    /// quality pass over the updated content. `before_rescore` sees the
    /// updated batch just before that pass starts.
    pub async fn humanize_all_content(
        &self,
        results: &mut BatchResults,
        before_rescore: impl FnOnce(&BatchResults),
    ) -> HumanizeOutcome {
        let report = self.humanize_all(results).await;
        let qualities = if report.any_succeeded() {
            before_rescore(results);
            Some(self.analyze_multiple_qualities(results).await)
        } else {
            None
        };
        HumanizeOutcome { report, qualities }
    }
}

fn distinct(platforms: &[Platform]) -> Vec<Platform> {
    let mut seen = Vec::with_capacity(platforms.len());
    for &platform in platforms {
        if !seen.contains(&platform) {
            seen.push(platform);
        }
    }
    seen
}

fn settle_generation(
    platform: Platform,
    outcome: Result<GenerateResponse, ApiError>,
) -> PlatformResult {
    let result = match outcome {
        Ok(response) if !response.generated_content.trim().is_empty() => {
            PlatformResult::generated(platform, response.generated_content)
        }
        Ok(_) => PlatformResult::failed(platform, "backend returned empty content"),
        Err(err) => {
            warn!(%platform, kind = ?err.kind(), error = %err, "Generation failed");
            PlatformResult::failed(platform, err.to_string())
        }
    };
    if result.is_success() {
        counter!("kusi_generation_success_total", "platform" => platform.as_str()).increment(1);
    } else {
        counter!("kusi_generation_failure_total", "platform" => platform.as_str()).increment(1);
    }
    result
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::application::testing::ScriptedApi;

    const BODY: &str = "We are launching our new product today with great excitement";

    fn engine(api: &Arc<ScriptedApi>) -> FanOutEngine {
        FanOutEngine::new(api.clone(), GenerationOptions::default())
    }

    #[tokio::test]
    async fn every_platform_gets_exactly_one_entry() {
        let api = Arc::new(ScriptedApi::new().failing_generation([Platform::Twitter]));
        let platforms = [Platform::Linkedin, Platform::Twitter, Platform::Blog];

        let results = engine(&api)
            .generate_for_all_platforms("Launch", BODY, &platforms)
            .await
            .expect("valid input");

        assert_eq!(results.len(), 3);
        assert_eq!(results.platforms(), platforms.to_vec());
        let twitter = results.get(Platform::Twitter).expect("twitter entry");
        assert_eq!(twitter.generated_text, None);
        assert!(twitter.error.as_deref().is_some_and(|e| !e.is_empty()));
        assert!(results.get(Platform::Linkedin).is_some_and(PlatformResult::is_success));
        assert!(results.get(Platform::Blog).is_some_and(PlatformResult::is_success));
    }

    #[tokio::test]
    async fn short_body_is_rejected_without_any_call() {
        let api = Arc::new(ScriptedApi::new());
        let err = engine(&api)
            .generate_for_all_platforms("Launch", "  too short ", &[Platform::Linkedin])
            .await
            .expect_err("body under 10 characters");

        assert!(matches!(err, DomainError::Validation { .. }));
        assert_eq!(api.generate_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_platform_set_is_rejected() {
        let api = Arc::new(ScriptedApi::new());
        let err = engine(&api)
            .generate_for_all_platforms("Launch", BODY, &[])
            .await
            .expect_err("no platforms");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn duplicate_platforms_are_generated_once() {
        let api = Arc::new(ScriptedApi::new());
        let results = engine(&api)
            .generate_for_all_platforms("Launch", BODY, &[Platform::Blog, Platform::Blog])
            .await
            .expect("valid input");
        assert_eq!(results.len(), 1);
        assert_eq!(api.generate_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn generation_calls_run_concurrently() {
        let api = Arc::new(ScriptedApi::new().with_delay_ms(20));
        engine(&api)
            .generate_for_all_platforms("Launch", BODY, &Platform::ALL)
            .await
            .expect("valid input");
        assert_eq!(api.max_in_flight.load(Ordering::SeqCst), Platform::ALL.len());
    }

    #[tokio::test]
    async fn empty_generated_text_counts_as_failure() {
        let api = Arc::new(ScriptedApi::new().empty_generation([Platform::Facebook]));
        let results = engine(&api)
            .generate_for_all_platforms("Launch", BODY, &[Platform::Facebook])
            .await
            .expect("valid input");
        let facebook = results.get(Platform::Facebook).expect("entry");
        assert!(!facebook.is_success());
        assert_eq!(facebook.error.as_deref(), Some("backend returned empty content"));
    }

    #[tokio::test]
    async fn quality_pass_skips_failed_platforms() {
        let api = Arc::new(ScriptedApi::new().with_quality_score(82.0));
        let results: BatchResults = [
            PlatformResult::generated(Platform::Linkedin, "post"),
            PlatformResult::failed(Platform::Twitter, "network error: refused"),
        ]
        .into_iter()
        .collect();

        let qualities = engine(&api).analyze_multiple_qualities(&results).await;

        assert_eq!(api.quality_calls.load(Ordering::SeqCst), 1);
        assert_eq!(qualities.len(), 2);
        let linkedin = qualities.get(Platform::Linkedin).expect("linkedin");
        assert_eq!(linkedin.score, 82.0);
        assert_eq!(linkedin.error, None);
        let twitter = qualities.get(Platform::Twitter).expect("twitter");
        assert_eq!(twitter.score, 0.0);
        assert_eq!(twitter.error.as_deref(), Some("network error: refused"));
    }

    #[tokio::test]
    async fn quality_failures_are_reported_per_platform() {
        let api = Arc::new(ScriptedApi::new().failing_quality());
        let results: BatchResults = [PlatformResult::generated(Platform::Blog, "post")]
            .into_iter()
            .collect();
        let qualities = engine(&api).analyze_multiple_qualities(&results).await;
        let blog = qualities.get(Platform::Blog).expect("blog");
        assert_eq!(blog.score, 0.0);
        assert!(blog.error.is_some());
    }

    #[tokio::test]
    async fn humanize_runs_sequentially_and_survives_failures() {
        let api = Arc::new(
            ScriptedApi::new()
                .with_delay_ms(5)
                .failing_humanize([Platform::Twitter]),
        );
        let mut results: BatchResults = [
            PlatformResult::generated(Platform::Linkedin, "[linkedin] post"),
            PlatformResult::generated(Platform::Twitter, "[twitter] post"),
            PlatformResult::generated(Platform::Blog, "[blog] post"),
            PlatformResult::failed(Platform::Facebook, "down"),
        ]
        .into_iter()
        .collect();

        let outcome = engine(&api).humanize_all_content(&mut results, |_| {}).await;

        assert_eq!(api.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(api.humanize_calls.load(Ordering::SeqCst), 3);
        assert_eq!(outcome.report.humanized, vec![Platform::Linkedin, Platform::Blog]);
        assert_eq!(outcome.report.failed.len(), 1);
        assert_eq!(outcome.report.failed[0].platform, Platform::Twitter);

        let twitter = results.get(Platform::Twitter).expect("twitter");
        assert!(!twitter.is_humanized);
        assert_eq!(twitter.generated_text.as_deref(), Some("[twitter] post"));
        assert!(results.get(Platform::Blog).is_some_and(|r| r.is_humanized));

        let qualities = outcome.qualities.expect("re-analysis after a success");
        assert_eq!(qualities.len(), 4);
    }

    #[tokio::test]
    async fn humanize_without_success_skips_reanalysis() {
        let api = Arc::new(ScriptedApi::new().failing_humanize([Platform::Blog]));
        let mut results: BatchResults = [PlatformResult::generated(Platform::Blog, "[blog] x")]
            .into_iter()
            .collect();
        let outcome = engine(&api).humanize_all_content(&mut results, |_| {}).await;
        assert!(outcome.qualities.is_none());
        assert_eq!(api.quality_calls.load(Ordering::SeqCst), 0);
    }
}
