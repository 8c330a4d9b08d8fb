//! In-memory hook storage implementation

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::{HooksError, Result},
    types::Hook,
};

/// In-memory hook registry
///
/// Keeps hooks in registration order. Cloning shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHookRegistry {
    hooks: Arc<RwLock<Vec<Hook>>>,
}

impl InMemoryHookRegistry {
    /// Create a new in-memory hook registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `hooks`
    pub fn with_hooks(hooks: impl IntoIterator<Item = Hook>) -> Result<Self> {
        let registry = Self::new();
        for hook in hooks {
            registry.register_hook(hook)?;
        }
        Ok(registry)
    }

    /// Register a hook and return its ID
    ///
    /// A hook without an ID gets a fresh UUID. Registering an ID that already
    /// exists replaces that hook in place.
    pub fn register_hook(&self, mut hook: Hook) -> Result<String> {
        if hook.id.is_empty() {
            hook.id = Uuid::new_v4().to_string();
        }

        let hook_id = hook.id.clone();
        let mut hooks = self.hooks.write().map_err(|e| {
            HooksError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        match hooks.iter_mut().find(|h| h.id == hook_id) {
            Some(existing) => *existing = hook,
            None => hooks.push(hook),
        }

        Ok(hook_id)
    }

    /// Remove a hook by ID
    pub fn unregister_hook(&self, hook_id: &str) -> Result<()> {
        let mut hooks = self.hooks.write().map_err(|e| {
            HooksError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        let index = hooks
            .iter()
            .position(|h| h.id == hook_id)
            .ok_or_else(|| HooksError::HookNotFound(hook_id.to_string()))?;

        hooks.remove(index);
        Ok(())
    }

    /// Get a hook by ID
    pub fn get_hook(&self, hook_id: &str) -> Result<Hook> {
        let hooks = self
            .hooks
            .read()
            .map_err(|e| HooksError::StorageError(format!("Failed to acquire read lock: {}", e)))?;

        hooks
            .iter()
            .find(|h| h.id == hook_id)
            .cloned()
            .ok_or_else(|| HooksError::HookNotFound(hook_id.to_string()))
    }

    /// Snapshot of all hooks
    pub fn list_hooks(&self) -> Result<Vec<Hook>> {
        let hooks = self
            .hooks
            .read()
            .map_err(|e| HooksError::StorageError(format!("Failed to acquire read lock: {}", e)))?;

        Ok(hooks.clone())
    }
}

#[async_trait]
impl super::HookSource for InMemoryHookRegistry {
    async fn list_all(&self) -> Result<Vec<Hook>> {
        self.list_hooks()
    }
}
