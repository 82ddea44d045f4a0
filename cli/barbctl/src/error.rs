//! Error handling and display for the CLI.

use barblab_forms::FormError;
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Not authenticated. Run `barb login` to authenticate.")]
    NotAuthenticated,

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A form failed local validation and was not sent.
    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an API error from response details.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::NotAuthenticated => {
                eprintln!(
                    "\n{}",
                    "Hint: Run `barb login` (or `barb admin login`) first.".yellow()
                );
            }
            CliError::Api { status: 403, .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: This operation needs an admin session.".yellow()
                );
            }
            CliError::Form(form_err) => {
                if let Some(field) = form_err.field() {
                    eprintln!("\n{}", format!("Field: {}", field).yellow());
                }
            }
            CliError::Network(e) if e.is_timeout() => {
                eprintln!(
                    "\n{}",
                    "Hint: The backend did not answer in time. Check `request_timeout_ms`."
                        .yellow()
                );
            }
            CliError::Network(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Check your network connection and --api-url.".yellow()
                );
            }
            _ => {}
        }
    }
}
