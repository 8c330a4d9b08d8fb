//! Property-based tests for batched delivery and retry rounds
//!
//! Every generated hook carries the number of attempts it rejects before it
//! starts acknowledging, so the expected report can be computed up front.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use hookcast_hooks::{chunk, DispatchConfig, Hook, HookDispatcher, Scheduling, TriggerReport};
use hookcast_http::{HttpClientTrait, HttpError, StatusCode};
use proptest::prelude::*;
use serde_json::json;

/// Transport that fails each URL a fixed number of times, then answers 200
///
/// The failure budget is the last path segment of the URL.
#[derive(Default)]
struct FlakyClient {
    attempts: Mutex<HashMap<String, usize>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FlakyClient {
    fn attempts_for(&self, url: &str) -> usize {
        self.attempts.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl HttpClientTrait for FlakyClient {
    async fn post_json(
        &self,
        url: &str,
        _body: &serde_json::Value,
    ) -> hookcast_http::Result<StatusCode> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let seen = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(url.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let budget: usize = url.rsplit('/').next().unwrap().parse().unwrap();
        if seen > budget {
            Ok(StatusCode::OK)
        } else if seen % 2 == 0 {
            Err(HttpError::ConnectionFailed("connection reset".to_string()))
        } else {
            Ok(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// Strategy for a hook list: each entry is the number of rejected attempts
fn failure_budgets_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..6, 0..40)
}

fn hooks_for(budgets: &[usize]) -> Vec<Hook> {
    budgets
        .iter()
        .enumerate()
        .map(|(i, budget)| {
            Hook::new(
                format!("hook-{}", i),
                format!("Hook {}", i),
                format!("http://hooks.test/{}/{}", i, budget),
            )
        })
        .collect()
}

fn run(
    budgets: &[usize],
    batch_size: usize,
    retry_count: u32,
    scheduling: Scheduling,
) -> (TriggerReport, Arc<FlakyClient>) {
    let client = Arc::new(FlakyClient::default());
    let config = DispatchConfig::new()
        .with_batch_size(batch_size)
        .with_retry_count(retry_count)
        .with_scheduling(scheduling);
    let dispatcher = HookDispatcher::new(config, client.clone()).unwrap();

    let report =
        tokio_test::block_on(dispatcher.dispatch(hooks_for(budgets), &json!({"event": "ping"})));
    (report, client)
}

fn scheduling_strategy() -> impl Strategy<Value = Scheduling> {
    prop_oneof![Just(Scheduling::Bounded), Just(Scheduling::Unbounded)]
}

proptest! {
    /// Chunks concatenate back to the input, and only the last may be short
    #[test]
    fn prop_chunks_partition_input(items in prop::collection::vec(any::<u16>(), 0..200), size in 1usize..25) {
        let chunks = chunk(items.clone(), size).unwrap();

        let flattened: Vec<u16> = chunks.iter().flatten().copied().collect();
        prop_assert_eq!(flattened, items.clone());
        prop_assert_eq!(chunks.len(), items.len().div_ceil(size));

        if let Some((last, full)) = chunks.split_last() {
            prop_assert!(!last.is_empty() && last.len() <= size);
            prop_assert!(full.iter().all(|c| c.len() == size));
        }
    }

    /// Every hook ends up in exactly one report bucket
    #[test]
    fn prop_report_buckets_partition_hooks(
        budgets in failure_budgets_strategy(),
        batch_size in 1usize..12,
        retry_count in 1u32..5,
        scheduling in scheduling_strategy(),
    ) {
        let (report, _) = run(&budgets, batch_size, retry_count, scheduling);

        prop_assert_eq!(report.retry_rounds.len(), retry_count as usize - 1);
        prop_assert_eq!(report.total(), budgets.len());

        let mut seen = HashSet::new();
        let buckets = std::iter::once(&report.initial)
            .chain(report.retry_rounds.iter().map(|r| &r.recovered))
            .chain(std::iter::once(&report.final_failed));
        for bucket in buckets {
            for outcome in bucket {
                prop_assert!(seen.insert(outcome.endpoint_id.clone()));
            }
        }
        prop_assert_eq!(seen.len(), budgets.len());
    }

    /// A hook lands in the bucket of its first successful round, or in
    /// `finalFailed` once the rounds run out
    #[test]
    fn prop_hook_lands_in_first_successful_round(
        budgets in failure_budgets_strategy(),
        batch_size in 1usize..12,
        retry_count in 1u32..5,
    ) {
        let (report, _) = run(&budgets, batch_size, retry_count, Scheduling::Bounded);

        for (i, budget) in budgets.iter().enumerate() {
            let id = format!("hook-{}", i);
            let contains = |bucket: &[hookcast_hooks::DeliveryOutcome]| {
                bucket.iter().any(|o| o.endpoint_id == id)
            };

            if *budget == 0 {
                prop_assert!(contains(&report.initial));
            } else if *budget < retry_count as usize {
                prop_assert!(contains(report.retry_round(*budget as u32).unwrap()));
            } else {
                prop_assert!(contains(&report.final_failed));
            }
        }
        prop_assert!(report.initial.iter().all(|o| o.succeeded));
        prop_assert!(report.final_failed.iter().all(|o| !o.succeeded));
    }

    /// Acknowledged hooks are never contacted again, and failing hooks are
    /// contacted exactly once per round
    #[test]
    fn prop_attempts_stop_after_success(
        budgets in failure_budgets_strategy(),
        batch_size in 1usize..12,
        retry_count in 1u32..5,
        scheduling in scheduling_strategy(),
    ) {
        let (_, client) = run(&budgets, batch_size, retry_count, scheduling);

        for (i, budget) in budgets.iter().enumerate() {
            let url = format!("http://hooks.test/{}/{}", i, budget);
            let expected = (*budget + 1).min(retry_count as usize);
            prop_assert_eq!(client.attempts_for(&url), expected);
        }
    }

    /// Bounded scheduling never has more than one batch in flight
    #[test]
    fn prop_bounded_in_flight_never_exceeds_batch_size(
        budgets in failure_budgets_strategy(),
        batch_size in 1usize..12,
    ) {
        let (_, client) = run(&budgets, batch_size, 3, Scheduling::Bounded);

        prop_assert!(client.max_in_flight.load(Ordering::SeqCst) <= batch_size);
    }
}
