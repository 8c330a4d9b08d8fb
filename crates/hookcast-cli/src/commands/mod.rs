// Command handlers for the hookcast CLI

pub mod hooks;
pub mod trigger;

pub use hooks::HooksCommand;
pub use trigger::TriggerCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
