//! Trigger command handler

use std::path::PathBuf;

use async_trait::async_trait;
use hookcast_hooks::{
    ConfigLoader, FileHookSource, HookDispatcher, Settings, TriggerPayload, TriggerReport,
};
use tracing::{debug, info};

use super::Command;
use crate::{
    error::{CliError, CliResult},
    output::{self, OutputFormat, OutputStyle},
};

/// Fires one trigger against the hooks in a file
#[derive(Debug, Clone)]
pub struct TriggerCommand {
    hooks_file: PathBuf,
    config_file: Option<PathBuf>,
    client_address: Option<String>,
    data: Option<String>,
    format: OutputFormat,
    strict: bool,
}

impl TriggerCommand {
    /// Create a new trigger command
    pub fn new(hooks_file: impl Into<PathBuf>) -> Self {
        Self {
            hooks_file: hooks_file.into(),
            config_file: None,
            client_address: None,
            data: None,
            format: OutputFormat::default(),
            strict: false,
        }
    }

    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    pub fn with_client_address(mut self, address: Option<String>) -> Self {
        self.client_address = address;
        self
    }

    /// Extra payload fields, as a JSON object
    pub fn with_data(mut self, data: Option<String>) -> Self {
        self.data = data;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Fail with exit status 2 when any hook stays undelivered
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the payload from the command-line arguments
    pub fn payload(&self) -> CliResult<TriggerPayload> {
        let mut payload = TriggerPayload::new(self.client_address.clone());

        let Some(raw) = &self.data else {
            return Ok(payload);
        };

        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| CliError::InvalidArgument {
                message: format!("--data is not valid JSON: {}", e),
            })?;
        let serde_json::Value::Object(fields) = value else {
            return Err(CliError::InvalidArgument {
                message: "--data must be a JSON object".to_string(),
            });
        };

        for (key, value) in fields {
            payload = payload.with_field(key, value)?;
        }

        Ok(payload)
    }

    /// Load configuration from the optional file and the environment
    pub fn settings(&self) -> CliResult<Settings> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.config_file {
            loader = loader.with_path(path);
        }
        Ok(loader.load()?)
    }

    /// Run the trigger and return its report
    ///
    /// Configuration and payload problems abort before any hook is contacted.
    pub async fn run(&self) -> CliResult<TriggerReport> {
        let payload = self.payload()?;
        let settings = self.settings()?;

        let client = hookcast_http::shared_client(settings.http)?;
        let dispatcher = HookDispatcher::new(settings.dispatch, client)?;

        let source = FileHookSource::new(&self.hooks_file);
        debug!(hooks_file = %self.hooks_file.display(), "Triggering hooks from file");

        let report = dispatcher.trigger(&source, &payload).await?;
        info!(
            delivered = report.delivered_count(),
            total = report.total(),
            "Trigger finished"
        );
        Ok(report)
    }

    /// Render `report` in the selected format
    pub fn render(&self, report: &TriggerReport) -> CliResult<String> {
        match self.format {
            OutputFormat::Table => Ok(output::format_report_table(
                report,
                &OutputStyle::default(),
            )),
            OutputFormat::Json => output::format_report_json(report),
        }
    }

    /// Check the report against `--strict`
    pub fn check(&self, report: &TriggerReport) -> CliResult<()> {
        if self.strict && !report.all_delivered() {
            return Err(CliError::Undelivered {
                undelivered: report.final_failed.len(),
                total: report.total(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Command for TriggerCommand {
    async fn execute(&self) -> CliResult<()> {
        let report = self.run().await?;
        println!("{}", self.render(&report)?);
        self.check(&report)
    }
}
