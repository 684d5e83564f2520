//! Site bundle loading.
//!
//! A bundle is a JSON file holding the records the CLI operates on: sites,
//! templates, footprints and pages. It stands in for the production
//! database behind the catalog interface.

use std::fs;
use std::path::Path;

use mason_catalog::MemoryCatalog;
use mason_model::{Page, Site, Template, TemplateFootprint};
use serde::Deserialize;

use crate::error::CliError;

/// Records loaded from a site bundle file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SiteBundle {
    pub(crate) sites: Vec<Site>,
    pub(crate) templates: Vec<Template>,
    pub(crate) footprints: Vec<TemplateFootprint>,
    pub(crate) pages: Vec<Page>,
}

impl SiteBundle {
    /// Load a bundle from a JSON file.
    pub(crate) fn load(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Pick the site to operate on: the requested id, or the bundle's only
    /// site.
    pub(crate) fn select_site(&self, requested: Option<i64>) -> Result<&Site, CliError> {
        match requested {
            Some(id) => self
                .sites
                .iter()
                .find(|site| site.id == id)
                .ok_or_else(|| CliError::Validation(format!("site {id} not found in bundle"))),
            None => match self.sites.as_slice() {
                [only] => Ok(only),
                [] => Err(CliError::Validation("bundle contains no sites".to_owned())),
                _ => Err(CliError::Validation(
                    "bundle contains multiple sites, pass --site <id>".to_owned(),
                )),
            },
        }
    }

    /// Move the records into an in-memory catalog.
    pub(crate) fn into_catalog(self) -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        for template in self.templates {
            catalog = catalog.with_template(template);
        }
        for footprint in self.footprints {
            catalog = catalog.with_footprint(footprint);
        }
        for site in self.sites {
            catalog = catalog.with_site(site);
        }
        for page in self.pages {
            catalog = catalog.with_page(page);
        }
        catalog
    }
}
