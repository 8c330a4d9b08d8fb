//! Hooks command handler

use std::path::PathBuf;

use async_trait::async_trait;
use hookcast_hooks::{FileHookSource, Hook, HookSource};

use super::Command;
use crate::{
    error::CliResult,
    output::{self, OutputFormat},
};

/// Lists the hooks a trigger would contact
pub struct HooksCommand {
    hooks_file: PathBuf,
    format: OutputFormat,
}

impl HooksCommand {
    /// Create a new hooks command
    pub fn new(hooks_file: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            hooks_file: hooks_file.into(),
            format,
        }
    }

    /// Read the hook file
    pub async fn load(&self) -> CliResult<Vec<Hook>> {
        let hooks = FileHookSource::new(&self.hooks_file).list_all().await?;
        Ok(hooks)
    }

    /// Render `hooks` in the selected format
    pub fn render(&self, hooks: &[Hook]) -> CliResult<String> {
        match self.format {
            OutputFormat::Table => Ok(output::format_hooks_table(hooks)),
            OutputFormat::Json => output::format_hooks_json(hooks),
        }
    }
}

#[async_trait]
impl Command for HooksCommand {
    async fn execute(&self) -> CliResult<()> {
        let hooks = self.load().await?;
        println!("{}", self.render(&hooks)?);
        Ok(())
    }
}
