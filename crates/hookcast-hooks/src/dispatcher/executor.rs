//! Single delivery attempt

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use hookcast_http::{HttpClientTrait, StatusCode};
use tracing::{debug, warn};

use crate::types::{DeliveryOutcome, Hook};

/// Performs one POST to one hook and classifies the result
///
/// Never fails: a bad status, a transport error and an elapsed timeout all
/// become a `DeliveryOutcome` with `succeeded == false`, so one unreachable
/// hook cannot abort the rest of the fan-out.
#[derive(Clone)]
pub struct RequestExecutor {
    client: Arc<dyn HttpClientTrait>,
    attempt_timeout: Duration,
}

impl RequestExecutor {
    /// Create an executor
    ///
    /// # Arguments
    ///
    /// * `client` - Transport used for the POST
    /// * `attempt_timeout` - Upper bound on a single attempt
    pub fn new(client: Arc<dyn HttpClientTrait>, attempt_timeout: Duration) -> Self {
        Self {
            client,
            attempt_timeout,
        }
    }

    /// Deliver `body` to `hook`
    pub async fn attempt(&self, hook: &Hook, body: &serde_json::Value) -> DeliveryOutcome {
        let start = Instant::now();
        let result =
            tokio::time::timeout(self.attempt_timeout, self.client.post_json(&hook.url, body))
                .await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(Ok(status)) if status == StatusCode::OK => {
                debug!(hook_id = %hook.id, duration_ms = duration_ms, "Hook acknowledged");
                DeliveryOutcome::success(hook, status.as_u16())
            }
            Ok(Ok(status)) => {
                warn!(
                    hook_id = %hook.id,
                    url = %hook.url,
                    status = status.as_u16(),
                    "Hook answered with non-success status"
                );
                DeliveryOutcome::failure(hook, Some(status.as_u16()), None)
            }
            Ok(Err(e)) => {
                warn!(hook_id = %hook.id, url = %hook.url, error = %e, "Hook delivery failed");
                DeliveryOutcome::failure(hook, None, Some(e.to_string()))
            }
            Err(_) => {
                warn!(
                    hook_id = %hook.id,
                    url = %hook.url,
                    timeout_ms = self.attempt_timeout.as_millis() as u64,
                    "Hook delivery timed out"
                );
                DeliveryOutcome::failure(
                    hook,
                    None,
                    Some(format!(
                        "Delivery timed out after {}ms",
                        self.attempt_timeout.as_millis()
                    )),
                )
            }
        };

        outcome.with_duration_ms(duration_ms)
    }
}
