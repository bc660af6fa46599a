//! CLI-level errors (wraps engine errors)

use thiserror::Error;

use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::Tree(e) => match e {
                TreeError::ParseToken { .. }
                | TreeError::TruncatedInput
                | TreeError::TrailingTokens { .. } => crate::exitcode::DATAERR,
                TreeError::InvalidSweep(_) | TreeError::NodeLimitExceeded { .. } => {
                    crate::exitcode::USAGE
                }
                TreeError::Config(_) | TreeError::Render(_) => crate::exitcode::CONFIG,
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}
