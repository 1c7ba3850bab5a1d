use thiserror::Error;

use super::types::ParseArgError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Arg(#[from] ParseArgError),
    #[error(transparent)]
    Ini(#[from] inispect::Error),
}

/// Outcome of the one query operation, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteStatus {
    Ok,
    NotFound,
}
