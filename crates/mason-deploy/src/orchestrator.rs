//! Runs deployments end to end: snapshot, build, publish, record.

use std::thread;

use mason_build::{BuildError, SiteBuilder};
use mason_catalog::Catalog;
use mason_model::Site;

use crate::error::DeployError;
use crate::publisher::Publisher;
use crate::record::{Deployment, DeploymentStatus, TemplateSnapshot};
use crate::retry::RetryPolicy;
use crate::store::{DeployMetrics, DeploymentStore};

/// Drives one site's deployments against a catalog, a record store and a
/// publish target.
pub struct Orchestrator<'a> {
    catalog: &'a dyn Catalog,
    store: &'a dyn DeploymentStore,
    publisher: &'a dyn Publisher,
}

impl<'a> Orchestrator<'a> {
    #[must_use]
    pub fn new(
        catalog: &'a dyn Catalog,
        store: &'a dyn DeploymentStore,
        publisher: &'a dyn Publisher,
    ) -> Self {
        Self {
            catalog,
            store,
            publisher,
        }
    }

    /// Run a single deployment attempt for a site.
    ///
    /// A record is created only after the site's configuration has been
    /// validated, and its snapshot is captured at that moment. From then on
    /// any build or publish failure lands in the record: the record moves to
    /// `Failed`, the error is appended to its build log, and the record is
    /// returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] when no deployment attempt could be made at
    /// all: the site is missing or misconfigured, or the record store
    /// refuses a write. In those cases no record is left behind for the
    /// failure.
    pub fn deploy(&self, site_id: i64) -> Result<Deployment, DeployError> {
        let site = self.catalog.site(site_id).map_err(BuildError::from)?;
        let template = self
            .catalog
            .template(site.template_id)
            .map_err(BuildError::from)?;
        let footprint = match site.footprint_id {
            Some(id) => Some(self.catalog.footprint(id).map_err(BuildError::from)?),
            None => None,
        };
        mason_build::validate_site(&site, &template, footprint.as_ref())?;

        let snapshot = TemplateSnapshot::capture(&site, &template, footprint.as_ref());
        let record = self.store.create(site_id, snapshot)?;
        self.store.transition(record.id, DeploymentStatus::Building)?;
        tracing::info!(
            deployment = record.id,
            site = site_id,
            domain = %site.domain,
            "Deployment started"
        );

        match self.run_attempt(record.id, &site) {
            Ok(()) => self.store.transition(record.id, DeploymentStatus::Success),
            Err(err) => {
                tracing::warn!(
                    deployment = record.id,
                    domain = %site.domain,
                    error = %err,
                    "Deployment failed"
                );
                self.store.append_log(record.id, &err.to_string())?;
                self.store.transition(record.id, DeploymentStatus::Failed)
            }
        }
    }

    /// Deploy with retries per `policy`, backing off between attempts.
    ///
    /// Every attempt gets its own record, so a site's history shows each
    /// failure alongside the eventual success. Returns the final attempt's
    /// record, which may still be `Failed`.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError`] under the same conditions as [`Self::deploy`];
    /// such errors are not retried, since re-reading the same broken
    /// configuration cannot succeed.
    pub fn deploy_with_retry(
        &self,
        site_id: i64,
        policy: &RetryPolicy,
    ) -> Result<Deployment, DeployError> {
        let attempts = policy.max_attempts.max(1);
        let mut last = self.deploy(site_id)?;
        for attempt in 1..attempts {
            if last.status == DeploymentStatus::Success {
                break;
            }
            let wait = policy.backoff_after(attempt);
            tracing::warn!(
                site = site_id,
                attempt,
                backoff_ms = wait.as_millis(),
                "Deployment attempt failed, backing off"
            );
            thread::sleep(wait);
            last = self.deploy(site_id)?;
        }
        Ok(last)
    }

    fn run_attempt(&self, deployment_id: i64, site: &Site) -> Result<(), DeployError> {
        let output = SiteBuilder::new(self.catalog).build(site.id)?;
        for failure in &output.report.failures {
            self.store.append_log(
                deployment_id,
                &format!("Skipped page '{}': {}", failure.slug, failure.error),
            )?;
        }

        let receipt = self
            .publisher
            .publish(&site.domain, &output.files)
            .map_err(DeployError::Publish)?;

        let metrics = DeployMetrics {
            deployed_url: receipt.url,
            generated_files: output.files.keys().cloned().collect(),
            file_count: output.files.len(),
            total_size_bytes: output.files.values().map(|body| body.len() as u64).sum(),
            build_duration: output.report.duration,
        };
        self.store.record_metrics(deployment_id, &metrics)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mason_build::FileMap;
    use mason_catalog::MemoryCatalog;
    use mason_model::{Page, Template};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::publisher::{DirPublisher, PublishReceipt};
    use crate::store::MemoryDeploymentStore;

    struct FailingPublisher;

    impl Publisher for FailingPublisher {
        fn publish(
            &self,
            _domain: &str,
            _files: &FileMap,
        ) -> Result<PublishReceipt, std::io::Error> {
            Err(std::io::Error::other("disk full"))
        }
    }

    fn site() -> Site {
        Site {
            id: 7,
            domain: "acme.example".to_owned(),
            brand_name: "Acme".to_owned(),
            template_id: 1,
            enable_page_speed: false,
            ..Default::default()
        }
    }

    fn template() -> Template {
        Template {
            id: 1,
            name: "Landing".to_owned(),
            ..Default::default()
        }
    }

    fn page(id: i64, slug: &str, order: i32) -> Page {
        Page {
            id,
            site_id: 7,
            slug: slug.to_owned(),
            title: slug.to_owned(),
            order,
            ..Default::default()
        }
    }

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_site(site())
            .with_template(template())
            .with_page(page(1, "home", 0))
            .with_page(page(2, "about", 1))
    }

    #[test]
    fn test_deploy_success_records_url_and_metrics() {
        let catalog = catalog();
        let store = MemoryDeploymentStore::new();
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());

        let deployment = Orchestrator::new(&catalog, &store, &publisher)
            .deploy(7)
            .unwrap();

        assert_eq!(deployment.status, DeploymentStatus::Success);
        assert_eq!(deployment.deployed_url.as_deref(), Some("https://acme.example"));
        assert_eq!(deployment.file_count, Some(3));
        assert_eq!(
            deployment.generated_files,
            vec!["about.html", "index.html", "styles.css"]
        );
        assert!(deployment.total_size_bytes.unwrap() > 0);
        assert!(deployment.build_duration.is_some());
        assert!(deployment.completed_at.is_some());
        assert!(dir.path().join("acme.example/index.html").exists());
    }

    #[test]
    fn test_deploy_missing_template_leaves_no_record() {
        let catalog = MemoryCatalog::new().with_site(site());
        let store = MemoryDeploymentStore::new();
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());

        let err = Orchestrator::new(&catalog, &store, &publisher)
            .deploy(7)
            .unwrap_err();

        assert!(matches!(err, DeployError::Build(_)));
        assert!(store.list_for_site(7).unwrap().is_empty());
    }

    #[test]
    fn test_deploy_publish_failure_marks_record_failed() {
        let catalog = catalog();
        let store = MemoryDeploymentStore::new();

        let deployment = Orchestrator::new(&catalog, &store, &FailingPublisher)
            .deploy(7)
            .unwrap();

        assert_eq!(deployment.status, DeploymentStatus::Failed);
        assert!(deployment.deployed_url.is_none());
        assert!(deployment.completed_at.is_some());
        assert_eq!(deployment.build_log, "Publish failed: disk full\n");
    }

    #[test]
    fn test_deploy_logs_skipped_pages_but_succeeds() {
        let catalog = catalog().with_page(page(3, "../escape", 2));
        let store = MemoryDeploymentStore::new();
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());

        let deployment = Orchestrator::new(&catalog, &store, &publisher)
            .deploy(7)
            .unwrap();

        assert_eq!(deployment.status, DeploymentStatus::Success);
        assert_eq!(deployment.file_count, Some(3));
        assert_eq!(
            deployment.build_log,
            "Skipped page '../escape': slug contains a path separator\n"
        );
    }

    #[test]
    fn test_retry_creates_one_record_per_attempt() {
        let catalog = catalog();
        let store = MemoryDeploymentStore::new();
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        let last = Orchestrator::new(&catalog, &store, &FailingPublisher)
            .deploy_with_retry(7, &policy)
            .unwrap();

        assert_eq!(last.status, DeploymentStatus::Failed);
        let history = store.list_for_site(7).unwrap();
        assert_eq!(history.len(), 3);
        assert!(
            history
                .iter()
                .all(|d| d.status == DeploymentStatus::Failed)
        );
        assert_eq!(history[0].id, last.id);
    }

    #[test]
    fn test_retry_stops_after_success() {
        let catalog = catalog();
        let store = MemoryDeploymentStore::new();
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        let last = Orchestrator::new(&catalog, &store, &publisher)
            .deploy_with_retry(7, &policy)
            .unwrap();

        assert_eq!(last.status, DeploymentStatus::Success);
        assert_eq!(store.list_for_site(7).unwrap().len(), 1);
    }

    #[test]
    fn test_each_deploy_freezes_its_own_snapshot() {
        let store = MemoryDeploymentStore::new();
        let dir = tempfile::tempdir().unwrap();
        let publisher = DirPublisher::new(dir.path());

        let first_id = {
            let catalog = catalog();
            Orchestrator::new(&catalog, &store, &publisher)
                .deploy(7)
                .unwrap()
                .id
        };

        let mut edited = site();
        edited
            .template_variables
            .insert("tagline".to_owned(), "Now faster".to_owned());
        let catalog = MemoryCatalog::new()
            .with_site(edited)
            .with_template(template())
            .with_page(page(1, "home", 0));
        Orchestrator::new(&catalog, &store, &publisher)
            .deploy(7)
            .unwrap();

        let first = store.get(first_id).unwrap();
        assert!(first.template_snapshot.variables.is_empty());
        let history = store.list_for_site(7).unwrap();
        assert_eq!(
            history[0].template_snapshot.variables.get("tagline").map(String::as_str),
            Some("Now faster")
        );
    }
}
