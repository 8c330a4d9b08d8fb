//! Core data types for the hooks system
//!
//! Everything in this module is created fresh for one trigger and dropped once
//! the report has been handed back to the caller.
//!
//! # Examples
//!
//! ```ignore
//! use hookcast_hooks::*;
//!
//! let hook = Hook::new("billing", "Billing service", "https://billing.internal/hooks/ping");
//! let payload = TriggerPayload::new(Some("203.0.113.9".to_string()));
//! ```

use chrono::{DateTime, Utc};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::error::{HooksError, Result};

/// Body keys set by `TriggerPayload` itself; extra fields may not use them
pub const RESERVED_PAYLOAD_KEYS: [&str; 2] = ["clientAddress", "timestamp"];

/// A registered webhook endpoint
///
/// Read-only for the duration of a dispatch run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hook {
    /// Unique identifier for the hook (a UUID when assigned by the registry)
    #[serde(default)]
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// URL that receives the POST
    pub url: String,
}

impl Hook {
    /// Create a hook from its parts
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Data describing the event that fired the trigger
///
/// Serialized once per trigger; the same JSON body is shared by every
/// delivery attempt of every round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerPayload {
    /// Address of the client that caused the trigger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,

    /// When the trigger happened
    pub timestamp: DateTime<Utc>,

    /// Any extra fields, flattened into the body
    #[serde(flatten)]
    data: serde_json::Map<String, serde_json::Value>,
}

impl TriggerPayload {
    /// Payload stamped with the current time
    pub fn new(client_address: Option<String>) -> Self {
        Self {
            client_address,
            timestamp: Utc::now(),
            data: serde_json::Map::new(),
        }
    }

    /// Add an extra field to the body
    ///
    /// # Errors
    ///
    /// Returns `HooksError::InvalidArgument` when `key` is one of
    /// [`RESERVED_PAYLOAD_KEYS`].
    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<Self> {
        let key = key.into();
        if RESERVED_PAYLOAD_KEYS.contains(&key.as_str()) {
            return Err(HooksError::InvalidArgument(format!(
                "payload field '{}' is set by the trigger itself",
                key
            )));
        }
        self.data.insert(key, value);
        Ok(self)
    }

    /// Extra fields added with [`with_field`](Self::with_field)
    pub fn data(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.data
    }

    /// Render the JSON body sent to every hook
    pub fn to_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Classification of one delivery attempt to one hook
///
/// `succeeded` is the only field the dispatcher acts on; the rest is kept for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOutcome {
    /// ID of the hook that was contacted
    pub endpoint_id: String,

    /// Name of the hook
    pub name: String,

    /// URL that was contacted
    pub url: String,

    /// Whether the hook acknowledged with HTTP 200
    pub succeeded: bool,

    /// Status code, when a response arrived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Transport error, when no usable response arrived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Duration of the attempt in milliseconds
    #[serde(default)]
    pub duration_ms: u64,
}

impl DeliveryOutcome {
    /// Successful outcome for `hook`
    pub fn success(hook: &Hook, status_code: u16) -> Self {
        Self {
            endpoint_id: hook.id.clone(),
            name: hook.name.clone(),
            url: hook.url.clone(),
            succeeded: true,
            status_code: Some(status_code),
            error: None,
            duration_ms: 0,
        }
    }

    /// Failed outcome for `hook`
    pub fn failure(hook: &Hook, status_code: Option<u16>, error: Option<String>) -> Self {
        Self {
            endpoint_id: hook.id.clone(),
            name: hook.name.clone(),
            url: hook.url.clone(),
            succeeded: false,
            status_code,
            error,
            duration_ms: 0,
        }
    }

    /// Attach the attempt duration
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// The hook this outcome belongs to, for re-dispatch
    pub fn hook(&self) -> Hook {
        Hook::new(&self.endpoint_id, &self.name, &self.url)
    }
}

/// Partition of one batch or one round into successes and failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Outcomes with `succeeded == true`, in input order
    pub succeeded: Vec<DeliveryOutcome>,

    /// Outcomes with `succeeded == false`, in input order
    pub failed: Vec<DeliveryOutcome>,
}

impl RoundResult {
    /// Stable partition of `outcomes` by `succeeded`
    pub fn from_outcomes(outcomes: Vec<DeliveryOutcome>) -> Self {
        let (succeeded, failed): (Vec<_>, Vec<_>) =
            outcomes.into_iter().partition(|o| o.succeeded);
        Self { succeeded, failed }
    }

    /// Append another result, keeping order
    pub fn merge(&mut self, other: RoundResult) {
        self.succeeded.extend(other.succeeded);
        self.failed.extend(other.failed);
    }

    /// Number of outcomes in both partitions
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether the round contained no hooks at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Successes recovered by one retry round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryRound {
    /// Round number, starting at 1
    pub round: u32,

    /// Hooks that failed earlier and succeeded in this round
    pub recovered: Vec<DeliveryOutcome>,
}

/// Final result of a trigger
///
/// Every hook of the dispatch set appears in exactly one bucket. Serializes as
/// `{"initial": [...], "retrySuccess1": [...], ..., "finalFailed": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerReport {
    /// Successes of the initial pass
    pub initial: Vec<DeliveryOutcome>,

    /// One bucket per retry round, in round order
    pub retry_rounds: Vec<RetryRound>,

    /// Hooks that failed every round
    pub final_failed: Vec<DeliveryOutcome>,
}

impl TriggerReport {
    /// Successes recovered at retry round `round` (1-based)
    pub fn retry_round(&self, round: u32) -> Option<&[DeliveryOutcome]> {
        self.retry_rounds
            .iter()
            .find(|r| r.round == round)
            .map(|r| r.recovered.as_slice())
    }

    /// Number of hooks that eventually acknowledged the trigger
    pub fn delivered_count(&self) -> usize {
        self.initial.len()
            + self
                .retry_rounds
                .iter()
                .map(|r| r.recovered.len())
                .sum::<usize>()
    }

    /// Number of hooks in the dispatch set
    pub fn total(&self) -> usize {
        self.delivered_count() + self.final_failed.len()
    }

    /// Whether no hook ended up in `final_failed`
    pub fn all_delivered(&self) -> bool {
        self.final_failed.is_empty()
    }
}

impl Serialize for TriggerReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.retry_rounds.len() + 2))?;
        map.serialize_entry("initial", &self.initial)?;
        for round in &self.retry_rounds {
            map.serialize_entry(&format!("retrySuccess{}", round.round), &round.recovered)?;
        }
        map.serialize_entry("finalFailed", &self.final_failed)?;
        map.end()
    }
}
