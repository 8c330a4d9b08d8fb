//! Retry coordinator: drives a trigger through its rounds

use std::{num::NonZeroUsize, sync::Arc};

use futures::future::join_all;
use hookcast_http::HttpClientTrait;
use tracing::{debug, info, warn};

use super::{
    batch::BatchRunner, chunk::chunk_by, executor::RequestExecutor, report::ReportAggregator,
};
use crate::{
    config::{DispatchConfig, Scheduling},
    error::{HooksError, Result},
    registry::HookSource,
    types::{DeliveryOutcome, Hook, RoundResult, TriggerPayload, TriggerReport},
};

/// Fans a trigger out to every hook and retries the failures
///
/// Built once from a validated `DispatchConfig`; a dispatcher can serve any
/// number of triggers, including concurrent ones.
///
/// # Examples
///
/// ```ignore
/// let client = hookcast_http::shared_client(HttpConfig::default())?;
/// let dispatcher = HookDispatcher::new(DispatchConfig::default(), client)?;
///
/// let report = dispatcher.trigger(&registry, &TriggerPayload::new(None)).await?;
/// println!("{} of {} hooks delivered", report.delivered_count(), report.total());
/// ```
#[derive(Clone)]
pub struct HookDispatcher {
    config: DispatchConfig,
    batch_size: NonZeroUsize,
    runner: BatchRunner,
}

impl HookDispatcher {
    /// Create a dispatcher
    ///
    /// # Errors
    ///
    /// Returns `HooksError::InvalidConfiguration` when `config` does not
    /// validate. Nothing is sent in that case.
    pub fn new(config: DispatchConfig, client: Arc<dyn HttpClientTrait>) -> Result<Self> {
        config.validate()?;
        let batch_size = NonZeroUsize::new(config.batch_size).ok_or_else(|| {
            HooksError::InvalidConfiguration("batch_size must be at least 1".to_string())
        })?;

        let executor = RequestExecutor::new(client, config.attempt_timeout());
        Ok(Self {
            config,
            batch_size,
            runner: BatchRunner::new(executor),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Read the hook list from `source` once and dispatch `payload` to it
    ///
    /// # Errors
    ///
    /// Fails only when the hook list cannot be read or the payload cannot be
    /// serialized. Undeliverable hooks are reported, not raised.
    pub async fn trigger(
        &self,
        source: &dyn HookSource,
        payload: &TriggerPayload,
    ) -> Result<TriggerReport> {
        let hooks = source.list_all().await?;
        let body = payload.to_body()?;
        Ok(self.dispatch(hooks, &body).await)
    }

    /// Deliver `body` to `hooks`, retrying failures for the configured rounds
    pub async fn dispatch(&self, hooks: Vec<Hook>, body: &serde_json::Value) -> TriggerReport {
        info!(
            hook_count = hooks.len(),
            batch_size = self.batch_size.get(),
            retry_count = self.config.retry_count,
            scheduling = ?self.config.scheduling,
            "Dispatching trigger"
        );

        let mut report = ReportAggregator::new();

        let initial = self.run_round(0, hooks, body).await;
        report.record_initial(initial.succeeded);
        let mut failed = initial.failed;

        for round in 1..self.config.retry_count {
            if failed.is_empty() {
                debug!(round = round, "Nothing left to retry");
                report.record_retry(round, Vec::new());
                continue;
            }

            if let Some(backoff) = &self.config.round_backoff {
                let delay = backoff.delay_before_round(round);
                debug!(round = round, delay_ms = delay.as_millis() as u64, "Waiting before retry");
                tokio::time::sleep(delay).await;
            }

            let pending: Vec<Hook> = failed.iter().map(DeliveryOutcome::hook).collect();
            let result = self.run_round(round, pending, body).await;
            report.record_retry(round, result.succeeded);
            failed = result.failed;
        }

        for outcome in &failed {
            warn!(
                hook_id = %outcome.endpoint_id,
                url = %outcome.url,
                rounds = self.config.retry_count,
                "Hook failed every delivery round"
            );
        }

        let report = report.finish(failed);
        info!(
            total = report.total(),
            delivered = report.delivered_count(),
            final_failed = report.final_failed.len(),
            "Trigger complete"
        );
        report
    }

    /// Deliver to one round's hooks under the configured scheduling
    ///
    /// `Bounded` keeps a window of `batch_size` attempts in flight across the
    /// whole round. `Unbounded` starts every chunk at once.
    async fn run_round(&self, round: u32, hooks: Vec<Hook>, body: &serde_json::Value) -> RoundResult {
        debug!(
            round = round,
            hook_count = hooks.len(),
            batch_size = self.batch_size.get(),
            "Starting round"
        );

        let result = match self.config.scheduling {
            Scheduling::Bounded => self.runner.run_windowed(&hooks, body, self.batch_size).await,
            Scheduling::Unbounded => {
                let chunks = chunk_by(hooks, self.batch_size);
                let batches = join_all(chunks.iter().map(|chunk| self.runner.run(chunk, body))).await;

                let mut result = RoundResult::default();
                for batch in batches {
                    result.merge(batch);
                }
                result
            }
        };

        debug!(
            round = round,
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "Round complete"
        );
        result
    }
}
