//! Hookcast Hooks
//!
//! Fans a trigger out to every registered webhook in bounded batches and
//! retries the hooks that did not acknowledge.
//!
//! # Overview
//!
//! A trigger reads the hook list once, POSTs the same JSON payload to every
//! hook, and then re-sends it to the hooks that failed, for a configured
//! number of rounds. Hooks that acknowledged with HTTP 200 are never
//! contacted again within that trigger.
//!
//! # Architecture
//!
//! 1. **Hook Source** (`registry`): supplies the hook list (in memory or YAML file)
//! 2. **Dispatcher** (`dispatcher`): chunking, per-hook attempts, batches and rounds
//! 3. **Configuration** (`config`): batch size, round count, timeouts, scheduling
//! 4. **Types** (`types`): hooks, payloads, outcomes and the trigger report
//!
//! # Quick Start
//!
//! ```ignore
//! use hookcast_hooks::{DispatchConfig, Hook, HookDispatcher, InMemoryHookRegistry, TriggerPayload};
//!
//! let registry = InMemoryHookRegistry::new();
//! registry.register_hook(Hook::new("orders", "Orders", "https://orders.example.com/hook"))?;
//!
//! let client = hookcast_http::shared_client(Default::default())?;
//! let dispatcher = HookDispatcher::new(DispatchConfig::default(), client)?;
//!
//! let payload = TriggerPayload::new(Some("203.0.113.7".to_string()));
//! let report = dispatcher.trigger(&registry, &payload).await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```
//!
//! # Hook files
//!
//! ```yaml
//! hooks:
//!   - id: orders
//!     name: Orders service
//!     url: https://orders.example.com/hook
//!   - name: Audit log
//!     url: https://audit.example.com/ingest
//! ```
//!
//! Hooks without an `id` get a generated one.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod types;

pub use config::{BackoffConfig, ConfigLoader, DispatchConfig, Scheduling, Settings};
pub use dispatcher::{chunk, BatchRunner, HookDispatcher, ReportAggregator, RequestExecutor};
pub use error::{HooksError, Result};
pub use registry::{FileHookSource, HookSource, InMemoryHookRegistry};
pub use types::{
    DeliveryOutcome, Hook, RetryRound, RoundResult, TriggerPayload, TriggerReport,
    RESERVED_PAYLOAD_KEYS,
};
