//! Template definitions: base markup, capability flags, declared variables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Structural kind of a template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Fixed-structure template with no modular blocks.
    #[default]
    Monolithic,
    /// Template composed of swappable block types.
    Sectional,
}

/// Category of a declared template variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// SEO metadata (titles, descriptions).
    #[default]
    Meta,
    /// Brand identity values (names, taglines).
    Brand,
    /// Body copy.
    Content,
    /// Style-affecting values.
    Style,
    /// Script-affecting values.
    Script,
}

/// A substitution variable a template declares.
///
/// Required variables without a default must be provided by the site;
/// this is checked before a build starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariable {
    /// Placeholder name as it appears inside `{{...}}`.
    pub name: String,
    #[serde(default)]
    pub kind: VariableKind,
    /// Value used when the site provides none.
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// An immutable-per-version site template.
///
/// Sites reference templates by id and never mutate them. `base_html`,
/// `base_css` and `base_js` are the shells the build pipeline works on;
/// when `base_html` or `base_css` is absent, built-in defaults are used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub kind: TemplateKind,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub base_html: Option<String>,
    #[serde(default)]
    pub base_css: Option<String>,
    #[serde(default)]
    pub base_js: Option<String>,
    /// Whether site color overrides may rewrite this template's CSS.
    #[serde(default = "default_true")]
    pub supports_color_customization: bool,
    /// Whether the image optimizer may rewrite this template's pages.
    #[serde(default = "default_true")]
    pub supports_page_speed: bool,
    /// CSS custom-property names the template exposes for theming.
    #[serde(default)]
    pub color_variables: Vec<String>,
    /// Declared substitution variables.
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    /// Block type names a sectional template accepts.
    #[serde(default)]
    pub available_blocks: Vec<String>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            kind: TemplateKind::default(),
            version: default_version(),
            base_html: None,
            base_css: None,
            base_js: None,
            supports_color_customization: true,
            supports_page_speed: true,
            color_variables: Vec::new(),
            variables: Vec::new(),
            available_blocks: Vec::new(),
        }
    }
}

/// CMS flavor a footprint imitates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmsKind {
    Wordpress,
    Joomla,
    Drupal,
    Custom,
    #[default]
    None,
}

/// Per-template output path scheme.
///
/// A footprint only shapes where generated files land and contributes the
/// `{{footer}}` markup; it never affects rendered page content otherwise.
/// Path fields may contain `{{...}}` placeholders resolved from
/// `path_variables`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFootprint {
    pub id: i64,
    /// Template this footprint belongs to. A site may only combine a
    /// footprint with its owning template.
    pub template_id: i64,
    pub name: String,
    #[serde(default)]
    pub cms_kind: CmsKind,
    #[serde(default = "default_theme_path")]
    pub theme_path: String,
    #[serde(default = "default_css_path")]
    pub css_path: String,
    #[serde(default = "default_js_path")]
    pub js_path: String,
    #[serde(default = "default_images_path")]
    pub images_path: String,
    /// Values for `{{...}}` placeholders inside the path fields.
    #[serde(default)]
    pub path_variables: HashMap<String, String>,
    #[serde(default)]
    pub footer_html: Option<String>,
}

impl Default for TemplateFootprint {
    fn default() -> Self {
        Self {
            id: 0,
            template_id: 0,
            name: String::new(),
            cms_kind: CmsKind::default(),
            theme_path: default_theme_path(),
            css_path: default_css_path(),
            js_path: default_js_path(),
            images_path: default_images_path(),
            path_variables: HashMap::new(),
            footer_html: None,
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_owned()
}

fn default_true() -> bool {
    true
}

fn default_theme_path() -> String {
    "wp-content/themes/{{theme_name}}".to_owned()
}

fn default_css_path() -> String {
    "assets/css".to_owned()
}

fn default_js_path() -> String {
    "assets/js".to_owned()
}

fn default_images_path() -> String {
    "assets/images".to_owned()
}
