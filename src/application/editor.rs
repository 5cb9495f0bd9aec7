//! Editor state controller.
//!
//! Owns the current draft and the latest batch, mirrors the draft into the
//! cache on every edit, and allows at most one batch operation in flight.
//! The busy flag is cooperative: a second action while busy is a no-op.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::fanout::{FanOutEngine, HumanizeReport};
use crate::cache::{TtlCache, mutex_lock};
use crate::domain::draft::Draft;
use crate::domain::error::DomainError;
use crate::domain::platform::Platform;
use crate::domain::results::{BatchResults, QualityResults};
use crate::domain::summary::BatchSummary;
use crate::infra::http::ApiError;

const SOURCE: &str = "application::editor";
pub const DRAFT_KEY: &str = "current_draft";
pub const DRAFT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorPhase {
    #[default]
    Idle,
    Generating,
    AnalyzingQuality,
    Humanizing,
}

impl EditorPhase {
    pub fn is_busy(self) -> bool {
        !matches!(self, EditorPhase::Idle)
    }
}

/// Immutable view handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EditorState {
    pub draft: Draft,
    pub phase: EditorPhase,
    pub results: Option<BatchResults>,
    pub qualities: Option<QualityResults>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    /// Another batch operation was already running; nothing was sent.
    Busy,
}

impl<T> Outcome<T> {
    pub fn is_busy(&self) -> bool {
        matches!(self, Outcome::Busy)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Busy => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("no generated content yet; run a generation first")]
    NothingGenerated,
    #[error("backend unavailable: {0}")]
    Unavailable(#[source] ApiError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub summary: BatchSummary,
    pub results: BatchResults,
    /// Filled when every platform succeeded and auto-analysis is enabled.
    pub qualities: Option<QualityResults>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanizationReport {
    pub report: HumanizeReport,
    pub results: BatchResults,
    pub qualities: Option<QualityResults>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "connection", rename_all = "snake_case")]
pub enum Connection {
    Online,
    Offline { status: String },
}

/// Restores `Idle` when dropped, whatever path the operation took.
struct BusyGuard<'a> {
    state: &'a Mutex<EditorState>,
}

impl BusyGuard<'_> {
    fn transition(&mut self, phase: EditorPhase) {
        mutex_lock(self.state, SOURCE, "busy.transition").phase = phase;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        mutex_lock(self.state, SOURCE, "busy.release").phase = EditorPhase::Idle;
    }
}

pub struct EditorController {
    engine: FanOutEngine,
    cache: TtlCache,
    platforms: Vec<Platform>,
    auto_quality: bool,
    state: Mutex<EditorState>,
}

impl std::fmt::Debug for EditorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorController")
            .field("platforms", &self.platforms)
            .field("auto_quality", &self.auto_quality)
            .finish_non_exhaustive()
    }
}

impl EditorController {
    /// Builds the controller and restores any persisted draft before
    /// returning it.
    pub fn new(engine: FanOutEngine, cache: TtlCache, platforms: Vec<Platform>) -> Self {
        let controller = Self {
            engine,
            cache,
            platforms,
            auto_quality: true,
            state: Mutex::new(EditorState::default()),
        };
        controller.restore();
        controller
    }

    /// Toggles the quality pass that follows a fully successful generation.
    #[must_use]
    pub fn with_auto_quality(mut self, enabled: bool) -> Self {
        self.auto_quality = enabled;
        self
    }

    #[must_use]
    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Reloads the persisted draft, if one is still live.
    pub fn restore(&self) -> bool {
        match self.cache.get::<Draft>(DRAFT_KEY) {
            Some(draft) => {
                debug!(
                    title_len = draft.title.len(),
                    body_len = draft.body.len(),
                    "Restored draft"
                );
                self.lock("restore").draft = draft;
                true
            }
            None => false,
        }
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.lock("set_title").draft.title = title.into();
        self.persist_draft();
    }

    pub fn set_body(&self, body: impl Into<String>) {
        self.lock("set_body").draft.body = body.into();
        self.persist_draft();
    }

    pub fn set_draft(&self, draft: Draft) {
        self.lock("set_draft").draft = draft;
        self.persist_draft();
    }

    /// Persists the draft immediately; call on shutdown.
    pub fn flush(&self) {
        self.persist_draft();
    }

    pub fn clear_draft(&self) {
        self.lock("clear_draft").draft = Draft::default();
        if let Err(err) = self.cache.remove(DRAFT_KEY) {
            warn!(error = %err, "Failed to remove persisted draft");
        }
    }

    pub fn draft(&self) -> Draft {
        self.lock("draft").draft.clone()
    }

    pub fn phase(&self) -> EditorPhase {
        self.lock("phase").phase
    }

    pub fn snapshot(&self) -> EditorState {
        self.lock("snapshot").clone()
    }

    /// Adopts a batch produced elsewhere (for example a previous session).
    pub fn load_results(&self, results: BatchResults) {
        let mut state = self.lock("load_results");
        state.results = Some(results);
        state.qualities = None;
    }

    pub async fn generate(&self) -> Result<Outcome<GenerationReport>, EditorError> {
        let Some(mut guard) = self.try_enter(EditorPhase::Generating) else {
            return Ok(Outcome::Busy);
        };
        let draft = self.draft();
        let results = self
            .engine
            .generate_for_all_platforms(&draft.title, &draft.body, &self.platforms)
            .await?;
        let summary = BatchSummary::of(&results);
        info!(message = %summary.message, "Generation finished");
        {
            let mut state = self.lock("generate.store");
            state.results = Some(results.clone());
            state.qualities = None;
        }

        let qualities = if self.auto_quality && results.all_succeeded() {
            guard.transition(EditorPhase::AnalyzingQuality);
            let qualities = self.engine.analyze_multiple_qualities(&results).await;
            self.lock("generate.qualities").qualities = Some(qualities.clone());
            Some(qualities)
        } else {
            None
        };

        Ok(Outcome::Completed(GenerationReport {
            summary,
            results,
            qualities,
        }))
    }

    pub async fn analyze_quality(&self) -> Result<Outcome<QualityResults>, EditorError> {
        let Some(_guard) = self.try_enter(EditorPhase::AnalyzingQuality) else {
            return Ok(Outcome::Busy);
        };
        let results = self.generated_results()?;
        let qualities = self.engine.analyze_multiple_qualities(&results).await;
        self.lock("analyze_quality.store").qualities = Some(qualities.clone());
        Ok(Outcome::Completed(qualities))
    }

    pub async fn humanize(&self) -> Result<Outcome<HumanizationReport>, EditorError> {
        let Some(mut guard) = self.try_enter(EditorPhase::Humanizing) else {
            return Ok(Outcome::Busy);
        };
        let mut results = self.generated_results()?;
        let outcome = self
            .engine
            .humanize_all_content(&mut results, |updated| {
                guard.transition(EditorPhase::AnalyzingQuality);
                self.lock("humanize.rescore").results = Some(updated.clone());
            })
            .await;
        {
            let mut state = self.lock("humanize.store");
            state.results = Some(results.clone());
            if outcome.qualities.is_some() {
                state.qualities.clone_from(&outcome.qualities);
            }
        }

        Ok(Outcome::Completed(HumanizationReport {
            report: outcome.report,
            results,
            qualities: outcome.qualities,
        }))
    }

    /// Probes the backend health route. An unreachable backend is a blocking
    /// error; a reachable but unhealthy one reports `Offline`.
    pub async fn check_connection(&self) -> Result<Connection, EditorError> {
        let health = self
            .engine
            .api()
            .health()
            .await
            .map_err(EditorError::Unavailable)?;
        if health.is_healthy() {
            Ok(Connection::Online)
        } else {
            Ok(Connection::Offline {
                status: health.status,
            })
        }
    }

    fn try_enter(&self, phase: EditorPhase) -> Option<BusyGuard<'_>> {
        let mut state = self.lock("try_enter");
        if state.phase.is_busy() {
            debug!(current = ?state.phase, requested = ?phase, "Rejected while busy");
            return None;
        }
        state.phase = phase;
        Some(BusyGuard { state: &self.state })
    }

    fn generated_results(&self) -> Result<BatchResults, EditorError> {
        self.lock("generated_results")
            .results
            .clone()
            .filter(|results| results.success_count() > 0)
            .ok_or(EditorError::NothingGenerated)
    }

    fn persist_draft(&self) {
        let draft = self.draft();
        if let Err(err) = self.cache.put_with_ttl(DRAFT_KEY, &draft, DRAFT_TTL) {
            warn!(error = %err, "Draft not persisted; continuing in memory");
        }
    }

    fn lock(&self, op: &'static str) -> std::sync::MutexGuard<'_, EditorState> {
        mutex_lock(&self.state, SOURCE, op)
    }
}
