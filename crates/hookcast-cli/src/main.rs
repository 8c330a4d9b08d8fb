// Hookcast CLI entry point

use std::process::ExitCode;

use anyhow::Context;
use hookcast_cli::{output, router::CommandRouter};

fn main() -> anyhow::Result<ExitCode> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start the async runtime")?;

    let code = match runtime.block_on(CommandRouter::route()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.user_message());
            tracing::debug!(details = %e.technical_details(), "Command failed");
            ExitCode::from(e.exit_code())
        }
    };

    Ok(code)
}
