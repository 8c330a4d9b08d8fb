//! Sources of registered hooks
//!
//! The dispatcher does not own hook registrations. It asks a `HookSource` for
//! the full list once per trigger and works on that snapshot.
//!
//! # Examples
//!
//! ```ignore
//! use hookcast_hooks::{Hook, HookSource, InMemoryHookRegistry};
//!
//! let registry = InMemoryHookRegistry::new();
//! registry.register_hook(Hook::new("", "Audit log", "https://audit.internal/hook"))?;
//!
//! let hooks = registry.list_all().await?;
//! assert_eq!(hooks.len(), 1);
//! ```

pub mod file;
pub mod storage;

pub use file::FileHookSource;
pub use storage::InMemoryHookRegistry;

use async_trait::async_trait;

use crate::{error::Result, types::Hook};

/// Supplies the current list of registered hooks
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; a source may be shared by
/// concurrent triggers.
#[async_trait]
pub trait HookSource: Send + Sync {
    /// Return every registered hook, in registration order
    ///
    /// # Errors
    ///
    /// Returns `HooksError::SourceUnavailable` (or a storage error) when the
    /// list cannot be produced. An empty list is not an error.
    async fn list_all(&self) -> Result<Vec<Hook>>;
}
