use skyscan_core::CoreError;
use skyscan_results::FilterError;
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid search: {0}")]
    InvalidSearch(String),
    #[error("Invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Collaborator failure: {0}")]
    Collaborator(String),
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => CliError::InvalidSearch(msg),
            other => CliError::Collaborator(other.to_string()),
        }
    }
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::InvalidSearch(_) | CliError::InvalidFilter(_) => ExitCode::from(2),
            CliError::Config(_) => ExitCode::from(78),
            CliError::Collaborator(msg) => {
                tracing::error!("Collaborator failure: {}", msg);
                ExitCode::FAILURE
            }
            CliError::Output(_) => ExitCode::FAILURE,
        }
    }
}
