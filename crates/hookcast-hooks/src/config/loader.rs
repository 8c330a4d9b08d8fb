//! Settings loader
//!
//! Builds `Settings` from, in increasing priority:
//! 1. Built-in defaults
//! 2. An optional configuration file (format inferred from the extension)
//! 3. Environment variables, `HOOKCAST__<SECTION>__<KEY>`
//!    (for example `HOOKCAST__DISPATCH__BATCH_SIZE=25`)

use std::path::PathBuf;

use config::{Config, Environment, File};
use hookcast_http::HttpConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::DispatchConfig;
use crate::error::{HooksError, Result};

const ENV_PREFIX: &str = "HOOKCAST";
const ENV_SEPARATOR: &str = "__";

/// Everything a trigger needs to be configured
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Retry coordinator settings
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Settings {
    /// Check both sections
    ///
    /// # Errors
    ///
    /// Returns `HooksError::InvalidConfiguration` when the dispatch section
    /// does not validate or an HTTP timeout is zero.
    pub fn validate(&self) -> Result<()> {
        self.dispatch.validate()?;

        if self.http.timeout_ms == 0 {
            return Err(HooksError::InvalidConfiguration(
                "http.timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.http.connect_timeout_ms == 0 {
            return Err(HooksError::InvalidConfiguration(
                "http.connect_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads and validates `Settings`
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
    /// Replaces the process environment when set
    env_source: Option<config::Map<String, String>>,
}

impl ConfigLoader {
    /// Loader reading only the process environment
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: ENV_PREFIX.to_string(),
            env_source: None,
        }
    }

    /// Also read the file at `path`; the file must exist
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Read variables from `vars` instead of the process environment
    pub fn with_env_source(mut self, vars: config::Map<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// Load and validate settings
    ///
    /// # Errors
    ///
    /// Returns `HooksError::InvalidConfiguration` when the file cannot be
    /// read or parsed, a value has the wrong type, or validation fails.
    pub fn load(&self) -> Result<Settings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(File::from(path.clone()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(self.env_source.clone()),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;

        debug!(
            batch_size = settings.dispatch.batch_size,
            retry_count = settings.dispatch.retry_count,
            scheduling = ?settings.dispatch.scheduling,
            "Configuration loaded"
        );
        Ok(settings)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
