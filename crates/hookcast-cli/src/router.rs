// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    commands::{Command, HooksCommand, TriggerCommand},
    error::CliResult,
    output::OutputFormat,
};

/// Hookcast - batched webhook fan-out with retry rounds
#[derive(Parser, Debug)]
#[command(name = "hookcast")]
#[command(bin_name = "hookcast")]
#[command(about = "Batched webhook fan-out with retry rounds")]
#[command(
    long_about = "Hookcast POSTs one trigger payload to every registered webhook in bounded batches,\nthen retries the hooks that did not answer 200 for a configured number of rounds.\n\nQuick Start:\n  hookcast hooks --hooks hooks.yaml      List the hooks a trigger would contact\n  hookcast trigger --hooks hooks.yaml    Fire a trigger and print the report"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fire a trigger at every hook in a file
    #[command(about = "POST a trigger payload to every hook and retry the failures")]
    Trigger {
        /// YAML file listing the hooks
        #[arg(long, value_name = "FILE")]
        hooks: PathBuf,

        /// Configuration file (TOML, YAML or JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Address of the client that caused the trigger
        #[arg(long, value_name = "ADDR")]
        client_address: Option<String>,

        /// Extra payload fields as a JSON object
        #[arg(long, value_name = "JSON")]
        data: Option<String>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Exit with status 2 when any hook stays undelivered
        #[arg(long)]
        strict: bool,
    },

    /// List the hooks in a file
    #[command(about = "List the hooks a trigger would contact")]
    Hooks {
        /// YAML file listing the hooks
        #[arg(long, value_name = "FILE")]
        hooks: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

/// Route and execute commands
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and route to appropriate handler
    pub async fn route() -> CliResult<()> {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) if !e.use_stderr() => {
                // --help and --version
                e.print()?;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        crate::logging::init_logging(cli.verbose, cli.quiet);

        Self::execute(&cli).await
    }

    /// Execute a command
    pub async fn execute(cli: &Cli) -> CliResult<()> {
        match &cli.command {
            Commands::Trigger {
                hooks,
                config,
                client_address,
                data,
                format,
                strict,
            } => {
                let cmd = TriggerCommand::new(hooks)
                    .with_config_file(config.clone())
                    .with_client_address(client_address.clone())
                    .with_data(data.clone())
                    .with_format(*format)
                    .with_strict(*strict);
                cmd.execute().await
            }
            Commands::Hooks { hooks, format } => {
                let cmd = HooksCommand::new(hooks, *format);
                cmd.execute().await
            }
        }
    }
}
