//! Output locations for global assets.

use mason_model::TemplateFootprint;

/// Where a build's global assets land in the file map.
///
/// Without a footprint the flat `styles.css` / `scripts.js` names are used,
/// matching the default document shell's links. A footprint moves assets
/// into its CMS-flavored layout instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePlan {
    /// Stylesheet output path.
    pub css: String,
    /// Script output path.
    pub js: String,
}

impl FilePlan {
    /// Resolve asset paths for a site's footprint, if any.
    #[must_use]
    pub fn new(footprint: Option<&TemplateFootprint>) -> Self {
        match footprint {
            None => Self {
                css: "styles.css".to_owned(),
                js: "scripts.js".to_owned(),
            },
            Some(footprint) => Self {
                css: format!("{}/style.css", expand_path(&footprint.css_path, footprint)),
                js: format!("{}/script.js", expand_path(&footprint.js_path, footprint)),
            },
        }
    }
}

/// Replace `{{name}}` segments with the footprint's path variables.
fn expand_path(path: &str, footprint: &TemplateFootprint) -> String {
    let mut out = path.to_owned();
    for (name, value) in &footprint.path_variables {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}
