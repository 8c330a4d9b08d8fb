// CLI error types and user-facing messages

use hookcast_hooks::HooksError;
use hookcast_http::HttpError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Command line could not be parsed; holds clap's rendered message
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hook source error: {0}")]
    HookSource(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("{undelivered} of {total} hooks were not delivered")]
    Undelivered { undelivered: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'hookcast --help' for usage information.",
                    message
                )
            }
            CliError::Usage(msg) => msg.trim_end().to_string(),
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nCheck the --config file and HOOKCAST__* environment variables.",
                    msg
                )
            }
            CliError::HookSource(msg) => {
                format!("Could not read hooks: {}\n\nCheck the --hooks file.", msg)
            }
            CliError::Http(msg) => {
                format!("HTTP client setup failed: {}", msg)
            }
            CliError::Undelivered { undelivered, total } => {
                format!(
                    "{} of {} hooks were not delivered after every retry round.",
                    undelivered, total
                )
            }
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Process exit status for this error
    ///
    /// `2` means the trigger ran but some hooks stayed undelivered; every
    /// other error, usage errors included, is `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Undelivered { .. } => 2,
            _ => 1,
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl From<HooksError> for CliError {
    fn from(err: HooksError) -> Self {
        match err {
            HooksError::InvalidConfiguration(msg) => CliError::Config(msg),
            HooksError::SourceUnavailable(msg) => CliError::HookSource(msg),
            HooksError::InvalidArgument(msg) => CliError::InvalidArgument { message: msg },
            other => CliError::Internal(other.to_string()),
        }
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        CliError::Usage(err.render().to_string())
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        CliError::Http(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
