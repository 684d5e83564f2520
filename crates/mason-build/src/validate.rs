//! Pre-build configuration checks.
//!
//! Configuration errors are rejected here, before any page is rendered, so
//! a build either starts clean or not at all.

use mason_model::{Site, Template, TemplateFootprint};

use crate::error::BuildError;

/// Check a site's configuration against its template.
///
/// # Errors
///
/// Returns [`BuildError::Config`] when the footprint belongs to another
/// template, or a declared required variable has neither a default nor a
/// site-provided value.
pub fn validate_site(
    site: &Site,
    template: &Template,
    footprint: Option<&TemplateFootprint>,
) -> Result<(), BuildError> {
    if let Some(footprint) = footprint {
        if footprint.template_id != template.id {
            return Err(BuildError::Config(format!(
                "footprint {} belongs to template {}, not template {}",
                footprint.id, footprint.template_id, template.id
            )));
        }
    }

    for variable in &template.variables {
        if !variable.required {
            continue;
        }
        let has_default = variable
            .default_value
            .as_deref()
            .is_some_and(|value| !value.is_empty());
        if !has_default && !site.template_variables.contains_key(&variable.name) {
            return Err(BuildError::Config(format!(
                "required template variable '{}' has no value",
                variable.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use mason_model::TemplateVariable;

    use super::*;

    fn site() -> Site {
        Site {
            id: 7,
            domain: "acme.example".to_owned(),
            brand_name: "Acme".to_owned(),
            template_id: 1,
            ..Default::default()
        }
    }

    fn template() -> Template {
        Template {
            id: 1,
            name: "Landing".to_owned(),
            ..Default::default()
        }
    }

    fn required_variable(name: &str, default_value: Option<&str>) -> TemplateVariable {
        TemplateVariable {
            name: name.to_owned(),
            default_value: default_value.map(str::to_owned),
            required: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_configuration_passes() {
        assert!(validate_site(&site(), &template(), None).is_ok());
    }

    #[test]
    fn test_matching_footprint_passes() {
        let footprint = TemplateFootprint {
            id: 3,
            template_id: 1,
            name: "wp".to_owned(),
            ..Default::default()
        };

        assert!(validate_site(&site(), &template(), Some(&footprint)).is_ok());
    }

    #[test]
    fn test_foreign_footprint_rejected() {
        let footprint = TemplateFootprint {
            id: 3,
            template_id: 99,
            name: "wp".to_owned(),
            ..Default::default()
        };

        let err = validate_site(&site(), &template(), Some(&footprint)).unwrap_err();

        assert!(err.to_string().contains("footprint 3"));
    }

    #[test]
    fn test_required_variable_without_value_rejected() {
        let mut template = template();
        template.variables.push(required_variable("tagline", None));

        let err = validate_site(&site(), &template, None).unwrap_err();

        assert!(err.to_string().contains("'tagline'"));
    }

    #[test]
    fn test_required_variable_with_default_passes() {
        let mut template = template();
        template
            .variables
            .push(required_variable("tagline", Some("Build faster")));

        assert!(validate_site(&site(), &template, None).is_ok());
    }

    #[test]
    fn test_required_variable_with_empty_default_rejected() {
        let mut template = template();
        template.variables.push(required_variable("tagline", Some("")));

        assert!(validate_site(&site(), &template, None).is_err());
    }

    #[test]
    fn test_required_variable_provided_by_site_passes() {
        let mut site = site();
        site.template_variables
            .insert("tagline".to_owned(), "Build faster".to_owned());
        let mut template = template();
        template.variables.push(required_variable("tagline", None));

        assert!(validate_site(&site, &template, None).is_ok());
    }

    #[test]
    fn test_optional_variable_without_value_passes() {
        let mut template = template();
        template.variables.push(TemplateVariable {
            name: "tagline".to_owned(),
            default_value: None,
            required: false,
            ..Default::default()
        });

        assert!(validate_site(&site(), &template, None).is_ok());
    }
}
