use serde::Serialize;

use super::results::BatchResults;

/// User-facing tally of a generation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
    pub status: BatchStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Complete,
    Partial,
    Failed,
}

impl BatchSummary {
    pub fn new(succeeded: usize, total: usize) -> Self {
        let (status, message) = if total > 0 && succeeded == total {
            (
                BatchStatus::Complete,
                format!("generated for {succeeded} of {total} platforms"),
            )
        } else if succeeded == 0 {
            (
                BatchStatus::Failed,
                format!("generation failed for all {total} platforms"),
            )
        } else {
            (
                BatchStatus::Partial,
                format!("generated for {succeeded} of {total} platforms"),
            )
        };
        Self {
            succeeded,
            total,
            status,
            message,
        }
    }

    pub fn of(results: &BatchResults) -> Self {
        Self::new(results.success_count(), results.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_success_reports_a_count() {
        let summary = BatchSummary::new(1, 2);
        assert_eq!(summary.status, BatchStatus::Partial);
        assert_eq!(summary.message, "generated for 1 of 2 platforms");
    }

    #[test]
    fn total_failure_is_distinct() {
        let summary = BatchSummary::new(0, 3);
        assert_eq!(summary.status, BatchStatus::Failed);
        assert_eq!(summary.message, "generation failed for all 3 platforms");
    }

    #[test]
    fn full_success_is_complete() {
        assert_eq!(BatchSummary::new(5, 5).status, BatchStatus::Complete);
    }
}
