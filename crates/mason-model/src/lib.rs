//! Record types shared across the Mason build pipeline.
//!
//! These are plain data carriers: the pipeline reads them through the
//! catalog interface and never persists them itself. A [`Site`] references
//! exactly one [`Template`] (and optionally one of that template's
//! footprints); a [`Page`] owns its ordered [`PageBlock`]s.

mod block;
mod page;
mod site;
mod template;

pub use block::{BlockContent, FaqItem, GalleryImage, SwiperSlide};
pub use page::{Page, PageBlock};
pub use site::Site;
pub use template::{
    CmsKind, Template, TemplateFootprint, TemplateKind, TemplateVariable, VariableKind,
};
