//! Dispatcher configuration
//!
//! Batch size and retry count are process-wide settings, but they are passed
//! to the dispatcher explicitly so each dispatcher can be built (and tested)
//! with its own values.

pub mod loader;

pub use loader::{ConfigLoader, Settings};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HooksError, Result};

/// How chunks of one round are put on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheduling {
    /// One chunk at a time: at most `batch_size` requests in flight
    #[default]
    Bounded,

    /// Every chunk of the round at once: the whole round is in flight
    Unbounded,
}

/// Optional delay inserted before each retry round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before retry round 1, in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Growth factor applied for each further round
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Upper bound on any single delay, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            multiplier: default_multiplier(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl BackoffConfig {
    /// Delay to wait before retry round `round` (1-based)
    pub fn delay_before_round(&self, round: u32) -> Duration {
        let exponent = i32::try_from(round.saturating_sub(1)).unwrap_or(i32::MAX);
        let delay_ms = self.initial_delay_ms as f64 * self.multiplier.powi(exponent);
        let capped = delay_ms.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }
}

/// Settings for the retry coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Hooks per chunk
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Total passes, including the initial one
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Upper bound on one delivery attempt, in milliseconds
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,

    /// Chunk scheduling within a round
    #[serde(default)]
    pub scheduling: Scheduling,

    /// Delay between rounds; absent means retry immediately
    #[serde(default)]
    pub round_backoff: Option<BackoffConfig>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            retry_count: default_retry_count(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            scheduling: Scheduling::default(),
            round_backoff: None,
        }
    }
}

impl DispatchConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set retry count
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Set per-attempt timeout
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set chunk scheduling
    pub fn with_scheduling(mut self, scheduling: Scheduling) -> Self {
        self.scheduling = scheduling;
        self
    }

    /// Enable a delay between rounds
    pub fn with_round_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.round_backoff = Some(backoff);
        self
    }

    /// Per-attempt timeout as a `Duration`
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    /// Check the configuration
    ///
    /// # Errors
    ///
    /// Returns `HooksError::InvalidConfiguration` for a zero batch size, a
    /// zero retry count, a zero attempt timeout or a shrinking backoff.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size < 1 {
            return Err(HooksError::InvalidConfiguration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        if self.retry_count < 1 {
            return Err(HooksError::InvalidConfiguration(
                "retry_count must be at least 1".to_string(),
            ));
        }
        if self.attempt_timeout_ms == 0 {
            return Err(HooksError::InvalidConfiguration(
                "attempt_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if let Some(backoff) = &self.round_backoff {
            if backoff.multiplier.is_nan() || backoff.multiplier < 1.0 {
                return Err(HooksError::InvalidConfiguration(format!(
                    "round_backoff.multiplier must be at least 1.0, got {}",
                    backoff.multiplier
                )));
            }
        }
        Ok(())
    }
}

// Default value functions for serde
fn default_batch_size() -> usize {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_attempt_timeout_ms() -> u64 {
    10_000
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_multiplier() -> f64 {
    2.0
}

fn default_max_delay_ms() -> u64 {
    30_000
}
