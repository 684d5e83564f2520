//! Color theming over template CSS.

use mason_model::{Site, Template};
use regex::{NoExpand, Regex};

/// Rewrite CSS custom-property declarations with the site's color
/// overrides.
///
/// No-op unless the site has custom colors and the template supports color
/// customization. For each override `(name, value)`, declarations of the
/// form `--{name}: #RRGGBB;` are replaced with `--{name}: {value};`.
/// Declarations for colors the site does not override keep their template
/// defaults.
#[must_use]
pub fn apply_custom_colors(css: &str, site: &Site, template: &Template) -> String {
    if site.custom_colors.is_empty() || !template.supports_color_customization {
        return css.to_owned();
    }

    let mut out = css.to_owned();
    for (name, value) in &site.custom_colors {
        let pattern = format!(r"--{}:\s*#[0-9a-fA-F]{{6}};", regex::escape(name));
        let re = Regex::new(&pattern).expect("invalid color pattern");
        let replacement = format!("--{name}: {value};");
        out = re.replace_all(&out, NoExpand(&replacement)).into_owned();
    }
    out
}
