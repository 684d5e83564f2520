//! Site-unique class prefixing.
//!
//! Sites sharing infrastructure must not collide on CSS class names, so
//! every generated page carries a site-unique prefix on all of its class
//! attributes. The prefix itself is claimed through the catalog; this
//! module only generates candidates and rewrites markup.

use std::sync::LazyLock;

use rand::RngExt;
use regex::Regex;

/// Matches a whitespace-preceded `class` attribute with a non-empty value.
/// The leading whitespace capture keeps lookalikes such as `data-class`
/// untouched.
static CLASS_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\s)class="([^"]+)""#).expect("invalid class pattern"));

/// Generate a fresh class-prefix candidate for a site.
///
/// Format: `site-{site_id}-{unix_timestamp}-{six random lowercase letters}`.
/// The caller must claim the candidate through the catalog and adopt
/// whatever value the claim returns; a candidate that loses the claim race
/// is discarded.
#[must_use]
pub fn generate_class_prefix(site_id: i64) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let mut rng = rand::rng();
    let salt: String = (0..6)
        .map(|_| char::from(rng.random_range(b'a'..=b'z')))
        .collect();
    format!("site-{site_id}-{timestamp}-{salt}")
}

/// Prefix every `class="..."` attribute value in `html` with `prefix`.
///
/// The whole attribute value is treated as a unit: `class="a b"` becomes
/// `class="{prefix}-a b"`. Attributes other than `class` are untouched.
#[must_use]
pub fn prefix_classes(html: &str, prefix: &str) -> String {
    CLASS_ATTR_RE
        .replace_all(html, |caps: &regex::Captures<'_>| {
            format!("{}class=\"{prefix}-{}\"", &caps[1], &caps[2])
        })
        .into_owned()
}
