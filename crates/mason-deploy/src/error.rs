//! Deployment errors.

use mason_build::BuildError;

use crate::record::DeploymentStatus;

/// Error produced while orchestrating a deployment.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The site build failed.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Shipping the file map to the hosting provider failed.
    #[error("Publish failed: {0}")]
    Publish(#[source] std::io::Error),
    /// Deployment record does not exist.
    #[error("Deployment {id} not found")]
    NotFound {
        /// Record id that was looked up.
        id: i64,
    },
    /// Rejected status change on a deployment record.
    #[error("Illegal status transition: {from} -> {to}")]
    InvalidTransition {
        from: DeploymentStatus,
        to: DeploymentStatus,
    },
    /// Backend-specific store failure.
    #[error("Deployment store: {0}")]
    Store(String),
}
