//! Concurrent delivery to one group of hooks

use std::num::NonZeroUsize;

use futures::{future::join_all, stream, StreamExt};
use tracing::debug;

use super::executor::RequestExecutor;
use crate::types::{Hook, RoundResult};

/// Runs every attempt of a chunk concurrently and partitions the outcomes
#[derive(Clone)]
pub struct BatchRunner {
    executor: RequestExecutor,
}

impl BatchRunner {
    /// Create a runner around `executor`
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Deliver `body` to every hook of `hooks` and wait for all of them
    ///
    /// Successes and failures each keep the input order.
    pub async fn run(&self, hooks: &[Hook], body: &serde_json::Value) -> RoundResult {
        let outcomes = join_all(hooks.iter().map(|hook| self.executor.attempt(hook, body))).await;
        let result = RoundResult::from_outcomes(outcomes);

        debug!(
            batch_size = hooks.len(),
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "Batch complete"
        );
        result
    }

    /// Deliver `body` to every hook with at most `width` attempts in flight
    ///
    /// A new attempt starts as soon as any running one finishes, so one slow
    /// hook only holds up its own slot. Outcomes keep the input order.
    pub async fn run_windowed(
        &self,
        hooks: &[Hook],
        body: &serde_json::Value,
        width: NonZeroUsize,
    ) -> RoundResult {
        let attempts: Vec<_> = hooks
            .iter()
            .enumerate()
            .map(|(index, hook)| async move { (index, self.executor.attempt(hook, body).await) })
            .collect();
        let mut outcomes: Vec<_> = stream::iter(attempts)
            .buffer_unordered(width.get())
            .collect()
            .await;
        outcomes.sort_by_key(|(index, _)| *index);

        let result =
            RoundResult::from_outcomes(outcomes.into_iter().map(|(_, outcome)| outcome).collect());
        debug!(
            hook_count = hooks.len(),
            width = width.get(),
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "Windowed batch complete"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, sync::atomic::Ordering, time::Duration};

    use serde_json::json;

    use super::*;
    use crate::dispatcher::test_support::{Reply, ScriptedClient};

    fn hooks(ids: &[&str]) -> Vec<Hook> {
        ids.iter()
            .map(|id| Hook::new(*id, format!("Hook {}", id), format!("http://hooks.test/{}", id)))
            .collect()
    }

    fn runner(client: ScriptedClient) -> BatchRunner {
        BatchRunner::new(RequestExecutor::new(Arc::new(client), Duration::from_secs(5)))
    }

    fn ids(outcomes: &[crate::types::DeliveryOutcome]) -> Vec<&str> {
        outcomes.iter().map(|o| o.endpoint_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_partition_keeps_input_order() {
        let client = ScriptedClient::new()
            .script("b", [Reply::Status(500)])
            .script("d", [Reply::Refused]);

        let result = runner(client)
            .run(&hooks(&["a", "b", "c", "d", "e"]), &json!({}))
            .await;

        assert_eq!(ids(&result.succeeded), vec!["a", "c", "e"]);
        assert_eq!(ids(&result.failed), vec!["b", "d"]);
    }

    #[tokio::test]
    async fn test_every_hook_attempted_once() {
        let client = ScriptedClient::new();
        let calls = client.calls();

        let result = runner(client).run(&hooks(&["a", "b", "c"]), &json!({})).await;

        assert_eq!(result.len(), 3);
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_outcome_keeps_hook_identity() {
        let client = ScriptedClient::new().script("b", [Reply::Status(404)]);
        let input = hooks(&["b"]);

        let result = runner(client).run(&input, &json!({})).await;

        assert_eq!(result.failed[0].hook(), input[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempts_overlap() {
        let client = ScriptedClient::new().with_latency(Duration::from_millis(100));
        let max_in_flight = client.max_in_flight();

        runner(client).run(&hooks(&["a", "b", "c", "d"]), &json!({})).await;

        assert_eq!(max_in_flight.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_windowed_caps_in_flight_and_keeps_order() {
        let client = ScriptedClient::new()
            .with_latency(Duration::from_millis(10))
            .script("b", [Reply::Status(500)]);
        let max_in_flight = client.max_in_flight();

        let result = runner(client)
            .run_windowed(
                &hooks(&["a", "b", "c", "d", "e"]),
                &json!({}),
                NonZeroUsize::new(2).unwrap(),
            )
            .await;

        assert_eq!(ids(&result.succeeded), vec!["a", "c", "d", "e"]);
        assert_eq!(ids(&result.failed), vec!["b"]);
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_windowed_slow_hook_holds_only_its_slot() {
        let slow = Reply::Slow(Duration::from_secs(1));
        let client = ScriptedClient::new()
            .script("a", [slow])
            .script("c", [slow]);

        let start = tokio::time::Instant::now();
        let result = runner(client)
            .run_windowed(
                &hooks(&["a", "b", "c", "d"]),
                &json!({}),
                NonZeroUsize::new(2).unwrap(),
            )
            .await;

        assert_eq!(result.succeeded.len(), 4);
        // b finishes at once, so c starts alongside a instead of after it
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let result = runner(ScriptedClient::new()).run(&[], &json!({})).await;
        assert!(result.is_empty());
    }
}
