//! CLI error types.

use mason_build::BuildError;
use mason_config::ConfigError;
use mason_deploy::DeployError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Deploy(#[from] DeployError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Failed(String),
}
