//! In-memory catalog backend.
//!
//! Provides [`MemoryCatalog`] for unit testing and for the CLI, which
//! loads a site bundle into it before building.

use std::collections::HashMap;
use std::sync::RwLock;

use mason_model::{Page, Site, Template, TemplateFootprint};

use crate::catalog::{Catalog, CatalogError};

/// In-memory catalog.
///
/// Stores records in memory behind `RwLock`s. Use the builder methods to
/// seed it with data.
///
/// # Example
///
/// ```ignore
/// use mason_catalog::{Catalog, MemoryCatalog};
///
/// let catalog = MemoryCatalog::new()
///     .with_template(template)
///     .with_site(site)
///     .with_page(page);
///
/// let site = catalog.site(7).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    sites: RwLock<HashMap<i64, Site>>,
    templates: RwLock<HashMap<i64, Template>>,
    footprints: RwLock<HashMap<i64, TemplateFootprint>>,
    pages: RwLock<Vec<Page>>,
}

impl MemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a site.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_site(self, site: Site) -> Self {
        self.sites.write().unwrap().insert(site.id, site);
        self
    }

    /// Add a template.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_template(self, template: Template) -> Self {
        self.templates.write().unwrap().insert(template.id, template);
        self
    }

    /// Add a template footprint.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_footprint(self, footprint: TemplateFootprint) -> Self {
        self.footprints
            .write()
            .unwrap()
            .insert(footprint.id, footprint);
        self
    }

    /// Add a page.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page: Page) -> Self {
        self.pages.write().unwrap().push(page);
        self
    }
}

impl Catalog for MemoryCatalog {
    fn site(&self, id: i64) -> Result<Site, CatalogError> {
        self.sites
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("site", id).with_backend("Memory"))
    }

    fn template(&self, id: i64) -> Result<Template, CatalogError> {
        self.templates
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("template", id).with_backend("Memory"))
    }

    fn footprint(&self, id: i64) -> Result<TemplateFootprint, CatalogError> {
        self.footprints
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("footprint", id).with_backend("Memory"))
    }

    fn pages(&self, site_id: i64) -> Result<Vec<Page>, CatalogError> {
        let mut pages: Vec<Page> = self
            .pages
            .read()
            .unwrap()
            .iter()
            .filter(|p| p.site_id == site_id)
            .cloned()
            .collect();
        pages.sort_by_key(|p| p.order);
        Ok(pages)
    }

    fn claim_unique_class_prefix(
        &self,
        site_id: i64,
        candidate: &str,
    ) -> Result<String, CatalogError> {
        // Single write lock covers the read-then-write, so concurrent
        // claimants serialize here and exactly one candidate wins.
        let mut sites = self.sites.write().unwrap();
        let site = sites
            .get_mut(&site_id)
            .ok_or_else(|| CatalogError::not_found("site", site_id).with_backend("Memory"))?;

        match &site.unique_class_prefix {
            Some(existing) => Ok(existing.clone()),
            None => {
                site.unique_class_prefix = Some(candidate.to_owned());
                Ok(candidate.to_owned())
            }
        }
    }
}
