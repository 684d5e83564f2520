//! Catalog trait and error types.
//!
//! Provides the core [`Catalog`] trait for reading site, template and page
//! records from whatever system owns them, along with [`CatalogError`] for
//! unified error handling across backends.
//!
//! The catalog is read-only with one deliberate exception:
//! [`Catalog::claim_unique_class_prefix`] conditionally writes a site's
//! class prefix so that exactly one prefix is ever adopted, even when
//! concurrent first builds race.

use mason_model::{Page, Site, Template, TemplateFootprint};

/// Semantic error categories for catalog operations.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    /// Record does not exist.
    NotFound,
    /// Write rejected because the record changed underneath the caller.
    Conflict,
    /// Backend-specific failure.
    Backend,
}

/// Catalog error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct CatalogError {
    /// Semantic error category.
    pub kind: CatalogErrorKind,
    /// Record type context (e.g., "site", "template").
    pub record: Option<&'static str>,
    /// Record id context.
    pub id: Option<i64>,
    /// Backend identifier (e.g., "Memory").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CatalogError {
    /// Create a new catalog error.
    #[must_use]
    pub fn new(kind: CatalogErrorKind) -> Self {
        Self {
            kind,
            record: None,
            id: None,
            backend: None,
            source: None,
        }
    }

    /// Attach record type and id context.
    #[must_use]
    pub fn with_record(mut self, record: &'static str, id: i64) -> Self {
        self.record = Some(record);
        self.id = Some(id);
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error for a record.
    #[must_use]
    pub fn not_found(record: &'static str, id: i64) -> Self {
        Self::new(CatalogErrorKind::NotFound).with_record(record, id)
    }

    /// Create a conflict error for a record.
    #[must_use]
    pub fn conflict(record: &'static str, id: i64) -> Self {
        Self::new(CatalogErrorKind::Conflict).with_record(record, id)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (record id)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            CatalogErrorKind::NotFound => "Not found",
            CatalogErrorKind::Conflict => "Conflict",
            CatalogErrorKind::Backend => "Backend error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(record) = self.record {
            write!(f, " ({record}")?;
            if let Some(id) = self.id {
                write!(f, " {id}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to the records a site build consumes.
///
/// Implementations handle backend-specific details; the pipeline only
/// assumes that records returned for one build are a consistent snapshot.
pub trait Catalog: Send + Sync {
    /// Fetch a site by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the site doesn't exist or can't be read.
    fn site(&self, id: i64) -> Result<Site, CatalogError>;

    /// Fetch a template by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the template doesn't exist.
    fn template(&self, id: i64) -> Result<Template, CatalogError>;

    /// Fetch a template footprint by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the footprint doesn't exist.
    fn footprint(&self, id: i64) -> Result<TemplateFootprint, CatalogError>;

    /// Fetch all pages of a site, ordered by their `order` field.
    ///
    /// Includes unpublished pages; the builder filters them out.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the page list can't be read.
    fn pages(&self, site_id: i64) -> Result<Vec<Page>, CatalogError>;

    /// Claim the unique class prefix for a site.
    ///
    /// Atomic compare-and-set: if the site already has a prefix, that value
    /// is returned and `candidate` is discarded; otherwise `candidate` is
    /// persisted and returned. Every caller must adopt the returned value.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the site doesn't exist or the write
    /// fails.
    fn claim_unique_class_prefix(
        &self,
        site_id: i64,
        candidate: &str,
    ) -> Result<String, CatalogError>;
}
