//! `mason deploy` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use mason_config::{CliSettings, Config};
use mason_deploy::{
    DeploymentStatus, DeploymentStore, DirPublisher, MemoryDeploymentStore, Orchestrator,
    RetryPolicy,
};

use crate::bundle::SiteBundle;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the deploy command.
#[derive(Args)]
pub(crate) struct DeployArgs {
    /// Site id to deploy (default: the bundle's only site).
    #[arg(short, long)]
    site: Option<i64>,

    /// Site bundle file (overrides config).
    #[arg(short, long, env = "MASON_BUNDLE")]
    bundle: Option<PathBuf>,

    /// Publish root directory (overrides config).
    #[arg(long)]
    publish_root: Option<PathBuf>,

    /// Deployment attempts before giving up (overrides config).
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Path to configuration file (default: auto-discover mason.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show build and deployment logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl DeployArgs {
    /// Execute the deploy command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the bundle fails to load, no
    /// deployment attempt could be made, or the final attempt failed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            bundle: self.bundle.clone(),
            publish_root: self.publish_root.clone(),
            max_attempts: self.max_attempts,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let bundle = SiteBundle::load(&config.catalog_resolved.bundle)?;
        let site = bundle.select_site(self.site)?;
        let site_id = site.id;
        let domain = site.domain.clone();

        output.info(&format!(
            "Bundle: {}",
            config.catalog_resolved.bundle.display()
        ));
        output.info(&format!(
            "Publish root: {}",
            config.publish_resolved.root.display()
        ));
        output.info(&format!("Deploying {domain}"));

        let catalog = bundle.into_catalog();
        let store = MemoryDeploymentStore::new();
        let publisher = DirPublisher::new(config.publish_resolved.root.clone());
        let policy = RetryPolicy::new(
            config.deploy.max_attempts,
            Duration::from_millis(config.deploy.backoff_ms),
        );

        let deployment = Orchestrator::new(&catalog, &store, &publisher)
            .deploy_with_retry(site_id, &policy)?;

        for line in deployment.build_log.lines() {
            output.warning(line);
        }

        if deployment.status == DeploymentStatus::Success {
            output.success(&format!(
                "Deployed {} ({} files)",
                deployment.deployed_url.as_deref().unwrap_or(&domain),
                deployment.file_count.unwrap_or(0)
            ));
            Ok(())
        } else {
            let attempts = store.list_for_site(site_id)?.len();
            Err(CliError::Failed(format!(
                "deployment failed after {attempts} attempt(s)"
            )))
        }
    }
}
