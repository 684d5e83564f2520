//! Deployment orchestration and history.
//!
//! A deployment takes one site through build and publish while keeping an
//! immutable audit record of the attempt: status lifecycle, build log,
//! output metrics and a frozen snapshot of the configuration the build ran
//! against. Failed attempts stay in the history; retries create new records.

mod error;
mod orchestrator;
mod publisher;
mod record;
mod retry;
mod store;

pub use error::DeployError;
pub use orchestrator::Orchestrator;
pub use publisher::{DirPublisher, PublishReceipt, Publisher};
pub use record::{
    Deployment, DeploymentStatus, SnapshotFootprint, SnapshotSettings, SnapshotTemplate,
    TemplateSnapshot,
};
pub use retry::RetryPolicy;
pub use store::{DeployMetrics, DeploymentStore, MemoryDeploymentStore};
