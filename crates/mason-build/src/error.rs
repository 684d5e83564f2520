//! Build pipeline errors.

use mason_catalog::CatalogError;

/// Error produced while preparing or running a site build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Site configuration rejected before any build work started.
    #[error("Invalid site configuration: {0}")]
    Config(String),
    /// The catalog could not supply a record the build needs.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A single page could not be built.
    #[error("Page '{slug}': {reason}")]
    Page {
        /// Slug of the failing page.
        slug: String,
        /// What went wrong.
        reason: String,
    },
}
