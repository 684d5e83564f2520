//! Placeholder substitution for template text.
//!
//! Substitution is literal text replacement of `{{name}}` tokens, not a
//! templating language: no conditionals, no loops. Structure comes from
//! the block renderer and page assembler instead. The resolver type is the
//! single seam through which all substitution flows, so a structured
//! engine could replace it without touching callers.

use std::collections::BTreeMap;

use chrono::Datelike;
use mason_model::{Site, Template};

/// Literal `{{name}}` substitution over template text.
///
/// The variable map is merged at construction from three layers, later
/// layers winning on name collision:
///
/// 1. declared template variable defaults,
/// 2. the site's `template_variables`,
/// 3. computed values: `brand_name`, `domain`, `copyright_year`,
///    `language`.
///
/// Unknown placeholders pass through untouched so partially configured
/// templates still render.
#[derive(Debug, Clone)]
pub struct VariableResolver {
    values: BTreeMap<String, String>,
}

impl VariableResolver {
    /// Build the resolver for a site and its template.
    #[must_use]
    pub fn new(site: &Site, template: &Template) -> Self {
        Self::with_year(site, template, chrono::Utc::now().year())
    }

    /// Build the resolver with an explicit copyright year.
    #[must_use]
    pub fn with_year(site: &Site, template: &Template, year: i32) -> Self {
        let mut values = BTreeMap::new();

        for variable in &template.variables {
            if let Some(default) = &variable.default_value {
                values.insert(variable.name.clone(), default.clone());
            }
        }

        for (name, value) in &site.template_variables {
            values.insert(name.clone(), value.clone());
        }

        // Computed values win over whatever the site configured.
        values.insert("brand_name".to_owned(), site.brand_name.clone());
        values.insert("domain".to_owned(), site.domain.clone());
        values.insert("copyright_year".to_owned(), year.to_string());
        values.insert("language".to_owned(), site.language_code.clone());

        Self { values }
    }

    /// Substitute every known `{{name}}` placeholder in `text`.
    #[must_use]
    pub fn resolve(&self, text: &str) -> String {
        let mut out = text.to_owned();
        for (name, value) in &self.values {
            out = out.replace(&format!("{{{{{name}}}}}"), value);
        }
        out
    }
}
