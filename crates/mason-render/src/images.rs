//! Page-speed image rewriting.
//!
//! Replaces `<img>` tags with responsive `<picture>` markup carrying webp
//! sources for a mobile and a desktop breakpoint. The width query
//! parameters are drawn from a small range per tag; the variation is
//! cosmetic cache busting, so only the range is contractual.

use std::sync::LazyLock;

use mason_model::{Site, Template};
use rand::RngExt;
use regex::Regex;

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<img[^>]+>").expect("invalid img pattern"));

/// Requires a non-empty src; tags without one stay as they are.
static SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="([^"]+)""#).expect("invalid src pattern"));

static ALT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"alt="([^"]*)""#).expect("invalid alt pattern"));

/// Mobile breakpoint width range, inclusive.
const MOBILE_WIDTH: (u32, u32) = (470, 490);
/// Desktop breakpoint width range, inclusive.
const DESKTOP_WIDTH: (u32, u32) = (790, 810);

/// Rewrite every `<img>` tag in `html` into a `<picture>` element.
///
/// No-op unless the site's page-speed flag and the template's
/// `supports_page_speed` flag are both set. Each rewritten tag gets a
/// mobile source (max-width 768px), a desktop source (min-width 769px)
/// and a lazy-loading fallback `<img>` with the original src and alt.
/// Tags without a `src` attribute are left unmodified.
#[must_use]
pub fn optimize_images(html: &str, site: &Site, template: &Template) -> String {
    if !site.enable_page_speed || !template.supports_page_speed {
        return html.to_owned();
    }

    IMG_TAG_RE
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let tag = &caps[0];
            let Some(src) = SRC_RE.captures(tag).map(|c| c[1].to_owned()) else {
                return tag.to_owned();
            };
            let alt = ALT_RE
                .captures(tag)
                .map(|c| c[1].to_owned())
                .unwrap_or_default();

            let mut rng = rand::rng();
            let mobile = rng.random_range(MOBILE_WIDTH.0..=MOBILE_WIDTH.1);
            let desktop = rng.random_range(DESKTOP_WIDTH.0..=DESKTOP_WIDTH.1);

            format!(
                "<picture>\n\
                 <source media=\"(max-width: 768px)\" srcset=\"{src}?w={mobile}&format=webp\" type=\"image/webp\">\n\
                 <source media=\"(min-width: 769px)\" srcset=\"{src}?w={desktop}&format=webp\" type=\"image/webp\">\n\
                 <img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\">\n\
                 </picture>"
            )
        })
        .into_owned()
}
