//! Deployment record persistence.
//!
//! The store owns every mutation of a [`Deployment`] after creation, which
//! is what makes the record's immutability contracts enforceable: status
//! changes go through the transition check, `completed_at` is set in the
//! same critical section as the terminal status, and nothing ever writes
//! the snapshot again.

use std::sync::RwLock;
use std::time::Duration;

use chrono::Utc;

use crate::error::DeployError;
use crate::record::{Deployment, DeploymentStatus, TemplateSnapshot};

/// Metrics recorded onto a deployment after a successful build.
#[derive(Clone, Debug)]
pub struct DeployMetrics {
    /// Public URL the site serves from.
    pub deployed_url: String,
    /// Output paths produced by the build.
    pub generated_files: Vec<String>,
    pub file_count: usize,
    pub total_size_bytes: u64,
    pub build_duration: Duration,
}

/// Persistence contract for deployment records.
pub trait DeploymentStore: Send + Sync {
    /// Create a new record in `Pending` with its frozen snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] if the record cannot be persisted.
    fn create(
        &self,
        site_id: i64,
        snapshot: TemplateSnapshot,
    ) -> Result<Deployment, DeployError>;

    /// Fetch a record by id.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::NotFound`] if the record does not exist.
    fn get(&self, id: i64) -> Result<Deployment, DeployError>;

    /// Atomically move a record to a new status.
    ///
    /// Terminal statuses set `completed_at` in the same write. Returns the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidTransition`] if the record's current
    /// status does not admit `to`.
    fn transition(&self, id: i64, to: DeploymentStatus) -> Result<Deployment, DeployError>;

    /// Record build metrics onto a record.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::NotFound`] if the record does not exist.
    fn record_metrics(&self, id: i64, metrics: &DeployMetrics) -> Result<(), DeployError>;

    /// Append one line to a record's build log.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::NotFound`] if the record does not exist.
    fn append_log(&self, id: i64, line: &str) -> Result<(), DeployError>;

    /// All deployments of a site, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] if the list cannot be read.
    fn list_for_site(&self, site_id: i64) -> Result<Vec<Deployment>, DeployError>;
}

#[derive(Debug, Default)]
struct Records {
    next_id: i64,
    rows: Vec<Deployment>,
}

/// In-memory deployment store for tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryDeploymentStore {
    records: RwLock<Records>,
}

impl MemoryDeploymentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryDeploymentStore {
    fn with_row<T>(
        &self,
        id: i64,
        f: impl FnOnce(&mut Deployment) -> Result<T, DeployError>,
    ) -> Result<T, DeployError> {
        let mut records = self.records.write().unwrap();
        let row = records
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(DeployError::NotFound { id })?;
        f(row)
    }
}

impl DeploymentStore for MemoryDeploymentStore {
    fn create(
        &self,
        site_id: i64,
        snapshot: TemplateSnapshot,
    ) -> Result<Deployment, DeployError> {
        let mut records = self.records.write().unwrap();
        records.next_id += 1;

        let deployment = Deployment {
            id: records.next_id,
            site_id,
            status: DeploymentStatus::Pending,
            template_snapshot: snapshot,
            deployed_url: None,
            generated_files: Vec::new(),
            file_count: None,
            total_size_bytes: None,
            build_duration: None,
            build_log: String::new(),
            created_at: Utc::now(),
            completed_at: None,
        };
        records.rows.push(deployment.clone());
        Ok(deployment)
    }

    fn get(&self, id: i64) -> Result<Deployment, DeployError> {
        self.records
            .read()
            .unwrap()
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(DeployError::NotFound { id })
    }

    fn transition(&self, id: i64, to: DeploymentStatus) -> Result<Deployment, DeployError> {
        self.with_row(id, |row| {
            if !row.status.can_transition(to) {
                return Err(DeployError::InvalidTransition {
                    from: row.status,
                    to,
                });
            }
            // Status and completion time change in one critical section so
            // readers never see a terminal status without its timestamp.
            row.status = to;
            if to.is_terminal() {
                row.completed_at = Some(Utc::now());
            }
            Ok(row.clone())
        })
    }

    fn record_metrics(&self, id: i64, metrics: &DeployMetrics) -> Result<(), DeployError> {
        self.with_row(id, |row| {
            row.deployed_url = Some(metrics.deployed_url.clone());
            row.generated_files = metrics.generated_files.clone();
            row.file_count = Some(metrics.file_count);
            row.total_size_bytes = Some(metrics.total_size_bytes);
            row.build_duration = Some(metrics.build_duration);
            Ok(())
        })
    }

    fn append_log(&self, id: i64, line: &str) -> Result<(), DeployError> {
        self.with_row(id, |row| {
            row.build_log.push_str(line);
            row.build_log.push('\n');
            Ok(())
        })
    }

    fn list_for_site(&self, site_id: i64) -> Result<Vec<Deployment>, DeployError> {
        let mut rows: Vec<Deployment> = self
            .records
            .read()
            .unwrap()
            .rows
            .iter()
            .filter(|row| row.site_id == site_id)
            .cloned()
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse((row.created_at, row.id)));
        Ok(rows)
    }
}
