//! Assembly of the final trigger report

use crate::types::{DeliveryOutcome, RetryRound, TriggerReport};

/// Collects round buckets into a `TriggerReport`
///
/// Performs no filtering: buckets are stored exactly as recorded.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    initial: Vec<DeliveryOutcome>,
    retry_rounds: Vec<RetryRound>,
}

impl ReportAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the successes of round 0
    pub fn record_initial(&mut self, succeeded: Vec<DeliveryOutcome>) {
        self.initial = succeeded;
    }

    /// Record the successes recovered at retry round `round`
    pub fn record_retry(&mut self, round: u32, recovered: Vec<DeliveryOutcome>) {
        self.retry_rounds.push(RetryRound { round, recovered });
    }

    /// Close the report with the hooks that never succeeded
    pub fn finish(self, final_failed: Vec<DeliveryOutcome>) -> TriggerReport {
        TriggerReport {
            initial: self.initial,
            retry_rounds: self.retry_rounds,
            final_failed,
        }
    }
}
