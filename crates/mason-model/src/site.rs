//! Tenant site records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A tenant's website instance.
///
/// A site references exactly one template and at most one of that
/// template's footprints; the footprint invariant is checked before a
/// build starts. `unique_class_prefix` starts unset, is claimed through
/// the catalog by the first build that needs it, and is then reused for
/// the site's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: i64,
    pub domain: String,
    pub brand_name: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    pub template_id: i64,
    #[serde(default)]
    pub footprint_id: Option<i64>,
    /// Site-provided values for declared template variables.
    #[serde(default)]
    pub template_variables: HashMap<String, String>,
    /// Color overrides keyed by CSS custom-property name, without the
    /// leading `--`.
    #[serde(default)]
    pub custom_colors: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub enable_page_speed: bool,
    #[serde(default)]
    pub unique_class_prefix: Option<String>,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            id: 0,
            domain: String::new(),
            brand_name: String::new(),
            language_code: default_language_code(),
            template_id: 0,
            footprint_id: None,
            template_variables: HashMap::new(),
            custom_colors: HashMap::new(),
            enable_page_speed: true,
            unique_class_prefix: None,
        }
    }
}

fn default_language_code() -> String {
    "en-EN".to_owned()
}

fn default_true() -> bool {
    true
}
