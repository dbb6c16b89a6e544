//! CLI errors

use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced to the terminal during startup
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
