use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber writing to stderr, so stdout stays
/// reserved for command output.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "kusi_cache_hit_total",
            Unit::Count,
            "Total number of live cache reads."
        );
        describe_counter!(
            "kusi_cache_miss_total",
            Unit::Count,
            "Total number of cache reads that found nothing usable."
        );
        describe_counter!(
            "kusi_cache_expired_total",
            Unit::Count,
            "Total number of cache entries evicted on read after their TTL."
        );
        describe_counter!(
            "kusi_cache_write_failed_total",
            Unit::Count,
            "Total number of cache writes rejected by the storage backend."
        );
        describe_counter!(
            "kusi_generation_success_total",
            Unit::Count,
            "Per-platform generation calls that produced content."
        );
        describe_counter!(
            "kusi_generation_failure_total",
            Unit::Count,
            "Per-platform generation calls that failed."
        );
        describe_counter!(
            "kusi_quality_failure_total",
            Unit::Count,
            "Per-platform quality analyses that failed."
        );
        describe_counter!(
            "kusi_humanize_failure_total",
            Unit::Count,
            "Per-platform humanization attempts that failed."
        );
        describe_counter!(
            "kusi_api_request_failed_total",
            Unit::Count,
            "Backend requests that ended in a transport or status error."
        );
    });
}
