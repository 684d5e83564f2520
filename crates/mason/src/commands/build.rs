//! `mason build` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use mason_build::SiteBuilder;
use mason_config::{CliSettings, Config};

use crate::bundle::SiteBundle;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Site id to build (default: the bundle's only site).
    #[arg(short, long)]
    site: Option<i64>,

    /// Site bundle file (overrides config).
    #[arg(short, long, env = "MASON_BUNDLE")]
    bundle: Option<PathBuf>,

    /// Output directory (default: <publish root>/<domain>).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mason.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (show build timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, the bundle, or the build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            bundle: self.bundle.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let bundle = SiteBundle::load(&config.catalog_resolved.bundle)?;
        let site = bundle.select_site(self.site)?;
        let site_id = site.id;
        let output_dir = self
            .output_dir
            .unwrap_or_else(|| config.publish_resolved.root.join(&site.domain));

        output.info(&format!(
            "Bundle: {}",
            config.catalog_resolved.bundle.display()
        ));
        output.info(&format!("Output: {}", output_dir.display()));

        let catalog = bundle.into_catalog();
        let built = SiteBuilder::new(&catalog).build(site_id)?;

        for (name, contents) in &built.files {
            let path = output_dir.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
        }

        for failure in &built.report.failures {
            output.warning(&format!(
                "Skipped page '{}': {}",
                failure.slug, failure.error
            ));
        }

        output.success(&format!(
            "Built {} files ({} pages) to {}",
            built.files.len(),
            built.report.pages_built,
            output_dir.display()
        ));
        Ok(())
    }
}
