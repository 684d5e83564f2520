//! Page assembly and site builds.
//!
//! A build reads one site's records through the catalog, assembles every
//! published page into a complete HTML document, and produces a file map
//! (output filename to UTF-8 content) plus a report. Per-page failures are
//! isolated: they are logged, recorded in the report and skipped, so a
//! single malformed page never blocks the rest of the site.

mod error;
mod page;
mod paths;
mod site;
mod validate;

pub use error::BuildError;
pub use page::PageAssembler;
pub use paths::FilePlan;
pub use site::{BuildOutput, BuildReport, FileMap, PageFailure, SiteBuilder};
pub use validate::validate_site;
