//! Leaf text transforms of the site-build pipeline.
//!
//! Everything here is a pure function over strings plus the site/template
//! records that gate it: placeholder substitution, unique-class prefixing,
//! color theming, image rewriting and block rendering. Gating rules live
//! with the transform they gate, so callers can apply every pass
//! unconditionally and let disabled passes fall through unchanged.

mod blocks;
mod classes;
mod colors;
mod escape;
mod images;
mod vars;

pub use blocks::render_block;
pub use classes::{generate_class_prefix, prefix_classes};
pub use colors::apply_custom_colors;
pub use escape::escape;
pub use images::optimize_images;
pub use vars::VariableResolver;
