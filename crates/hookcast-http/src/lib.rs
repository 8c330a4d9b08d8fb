//! HTTP transport for hookcast
//!
//! Provides the single capability the dispatcher needs from the network:
//! "POST this JSON body to this URL and tell me the status code".
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Configurable**: Timeouts, proxy, user-agent, redirect policy
//! - **Connection pooling**: Managed by underlying reqwest client
//! - **Status as data**: Every HTTP status is returned as `Ok`, only transport
//!   failures are errors

pub mod client;
pub mod config;
pub mod error;

pub use client::{shared_client, HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};

/// Re-export commonly used types
pub use reqwest::StatusCode;
