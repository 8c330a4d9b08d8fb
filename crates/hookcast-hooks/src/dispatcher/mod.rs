//! Batched fan-out with multi-round retry
//!
//! A trigger moves through rounds `0..retry_count`:
//!
//! 1. Round 0 splits every hook into chunks of `batch_size` and POSTs the
//!    payload to each of them.
//! 2. Every later round re-chunks only the hooks that failed the round
//!    before. Hooks that already acknowledged are never contacted again.
//! 3. Whatever is still failing after the last round lands in `finalFailed`.
//!
//! Rounds run strictly one after another because each round's input is the
//! previous round's failures. Within a round, requests are concurrent.

pub mod batch;
pub mod chunk;
pub mod coordinator;
pub mod executor;
pub mod report;

pub use batch::BatchRunner;
pub use chunk::chunk;
pub use coordinator::HookDispatcher;
pub use executor::RequestExecutor;
pub use report::ReportAggregator;

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted transport for dispatcher unit tests

    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
        time::Duration,
    };

    use async_trait::async_trait;
    use hookcast_http::{HttpClientTrait, HttpError, StatusCode};

    /// What the fake endpoint does on one attempt
    #[derive(Debug, Clone, Copy)]
    pub enum Reply {
        Status(u16),
        /// 200 after an extra delay
        Slow(Duration),
        Refused,
        Hang,
    }

    /// Transport whose replies are scripted per hook
    ///
    /// Hooks are identified by the last path segment of their URL. Each
    /// attempt consumes the next scripted reply; the last one repeats.
    /// Unscripted hooks answer 200.
    #[derive(Default)]
    pub struct ScriptedClient {
        scripts: Mutex<HashMap<String, Vec<Reply>>>,
        calls: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
        latency: Duration,
        in_flight: AtomicUsize,
        max_in_flight: Arc<AtomicUsize>,
    }

    impl ScriptedClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn script(self, key: &str, replies: impl IntoIterator<Item = Reply>) -> Self {
            self.scripts
                .lock()
                .unwrap()
                .insert(key.to_string(), replies.into_iter().collect());
            self
        }

        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        pub fn calls(&self) -> Arc<Mutex<Vec<(String, serde_json::Value)>>> {
            self.calls.clone()
        }

        pub fn max_in_flight(&self) -> Arc<AtomicUsize> {
            self.max_in_flight.clone()
        }

        fn next_reply(&self, key: &str) -> Reply {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(key) {
                Some(replies) if replies.len() > 1 => replies.remove(0),
                Some(replies) => replies.first().copied().unwrap_or(Reply::Status(200)),
                None => Reply::Status(200),
            }
        }
    }

    #[async_trait]
    impl HttpClientTrait for ScriptedClient {
        async fn post_json(
            &self,
            url: &str,
            body: &serde_json::Value,
        ) -> hookcast_http::Result<StatusCode> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let key = url.rsplit('/').next().unwrap_or_default();
            let reply = self.next_reply(key);

            let delay = match reply {
                Reply::Slow(extra) => self.latency + extra,
                _ => self.latency,
            };
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            match reply {
                Reply::Status(code) => Ok(StatusCode::from_u16(code).unwrap()),
                Reply::Slow(_) => Ok(StatusCode::OK),
                Reply::Refused => Err(HttpError::ConnectionFailed("connection refused".to_string())),
                Reply::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }
}
