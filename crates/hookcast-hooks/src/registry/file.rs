//! Hook source backed by a YAML file
//!
//! Expected format:
//!
//! ```yaml
//! hooks:
//!   - id: billing
//!     name: Billing service
//!     url: https://billing.internal/hooks/ping
//!   - name: Audit log          # id is optional
//!     url: https://audit.internal/hook
//! ```

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{HooksError, Result},
    types::Hook,
};

#[derive(Debug, Deserialize)]
struct HookFile {
    #[serde(default)]
    hooks: Vec<Hook>,
}

/// Reads the hook list from a YAML file on every `list_all` call
#[derive(Debug, Clone)]
pub struct FileHookSource {
    path: PathBuf,
}

impl FileHookSource {
    /// Create a source for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the hook file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse hook file content
    ///
    /// Hooks without an ID get a fresh UUID. Duplicate IDs are rejected, since
    /// the report identifies hooks by ID.
    pub fn parse(content: &str) -> Result<Vec<Hook>> {
        let file: HookFile = serde_yaml::from_str(content)
            .map_err(|e| HooksError::SourceUnavailable(format!("Invalid hook file: {}", e)))?;

        let mut seen = HashSet::new();
        let mut hooks = Vec::with_capacity(file.hooks.len());
        for mut hook in file.hooks {
            if hook.id.is_empty() {
                hook.id = Uuid::new_v4().to_string();
            }
            if !seen.insert(hook.id.clone()) {
                return Err(HooksError::SourceUnavailable(format!(
                    "Duplicate hook id in hook file: {}",
                    hook.id
                )));
            }
            hooks.push(hook);
        }

        Ok(hooks)
    }
}

#[async_trait]
impl super::HookSource for FileHookSource {
    async fn list_all(&self) -> Result<Vec<Hook>> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            HooksError::SourceUnavailable(format!(
                "Failed to read hook file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let hooks = Self::parse(&content)?;
        debug!(
            path = %self.path.display(),
            hook_count = hooks.len(),
            "Loaded hooks from file"
        );
        Ok(hooks)
    }
}
