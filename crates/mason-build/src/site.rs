//! Site builds: every published page plus global assets.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::time::{Duration, Instant};

use mason_catalog::Catalog;
use mason_model::{Page, Site, Template};
use mason_render::{apply_custom_colors, generate_class_prefix};
use rayon::prelude::*;

use crate::error::BuildError;
use crate::page::PageAssembler;
use crate::paths::FilePlan;
use crate::validate::validate_site;

/// Fallback stylesheet used when a template has no `base_css`.
const DEFAULT_CSS: &str = r"* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: Arial, sans-serif; line-height: 1.6; }
.container { max-width: 1200px; margin: 0 auto; padding: 20px; }
.hero { min-height: 500px; display: flex; align-items: center; justify-content: center; }
.gallery-grid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 20px; }
";

/// Output filename to UTF-8 content.
pub type FileMap = BTreeMap<String, String>;

/// One page that could not be built.
#[derive(Clone, Debug)]
pub struct PageFailure {
    /// Slug of the skipped page.
    pub slug: String,
    /// Rendered error message.
    pub error: String,
}

/// Summary of a completed site build.
#[derive(Clone, Debug)]
pub struct BuildReport {
    /// Pages rendered into the file map.
    pub pages_built: usize,
    /// Pages skipped after a failure.
    pub failures: Vec<PageFailure>,
    /// Wall-clock build duration.
    pub duration: Duration,
}

/// A complete site build: the file map plus its report.
#[derive(Clone, Debug)]
pub struct BuildOutput {
    pub files: FileMap,
    pub report: BuildReport,
}

/// Builds the complete static file set for one site.
///
/// The builder holds no per-build state; `build` may be called repeatedly
/// and concurrently for different sites over the same catalog.
pub struct SiteBuilder<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> SiteBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    /// Build every published page of a site plus its global assets.
    ///
    /// Unpublished pages are excluded entirely: not rendered and not linked
    /// in navigation. Individual page failures are logged, recorded in the
    /// report and skipped; they never abort the rest of the build.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when the site configuration is invalid or a
    /// record the build needs cannot be read. Per-page failures are not
    /// errors at this level.
    pub fn build(&self, site_id: i64) -> Result<BuildOutput, BuildError> {
        let start = Instant::now();

        let site = self.catalog.site(site_id)?;
        let template = self.catalog.template(site.template_id)?;
        let footprint = match site.footprint_id {
            Some(id) => Some(self.catalog.footprint(id)?),
            None => None,
        };
        validate_site(&site, &template, footprint.as_ref())?;

        let class_prefix = match &site.unique_class_prefix {
            Some(prefix) => prefix.clone(),
            None => {
                let candidate = generate_class_prefix(site.id);
                self.catalog.claim_unique_class_prefix(site.id, &candidate)?
            }
        };

        let pages: Vec<Page> = self
            .catalog
            .pages(site.id)?
            .into_iter()
            .filter(|page| page.is_published)
            .collect();

        let assembler = PageAssembler::new(
            &site,
            &template,
            footprint.as_ref(),
            &pages,
            &class_prefix,
        );

        // Pages have no ordering dependency; navigation was snapshotted
        // above, so renders can run in parallel.
        let outcomes: Vec<Result<String, BuildError>> = pages
            .par_iter()
            .map(|page| check_slug(page).map(|()| assembler.assemble(page)))
            .collect();

        let mut files = BTreeMap::new();
        let mut failures = Vec::new();
        let mut pages_built = 0;
        for (page, outcome) in pages.iter().zip(outcomes) {
            match outcome {
                Ok(html) => match files.entry(page.output_filename()) {
                    Entry::Vacant(entry) => {
                        entry.insert(html);
                        pages_built += 1;
                    }
                    Entry::Occupied(entry) => {
                        let error = format!(
                            "output filename '{}' already produced by another page",
                            entry.key()
                        );
                        tracing::warn!(slug = %page.slug, error = %error, "Skipping page");
                        failures.push(PageFailure {
                            slug: page.slug.clone(),
                            error,
                        });
                    }
                },
                Err(e) => {
                    tracing::warn!(slug = %page.slug, error = %e, "Skipping page");
                    let error = match e {
                        BuildError::Page { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    failures.push(PageFailure {
                        slug: page.slug.clone(),
                        error,
                    });
                }
            }
        }

        let plan = FilePlan::new(footprint.as_ref());
        files.insert(plan.css, global_css(&site, &template));
        if let Some(js) = template.base_js.as_deref().filter(|js| !js.is_empty()) {
            files.insert(plan.js, js.to_owned());
        }

        let duration = start.elapsed();
        tracing::info!(
            files = files.len(),
            skipped = failures.len(),
            domain = %site.domain,
            elapsed_ms = elapsed_ms(start),
            "Site build complete"
        );

        Ok(BuildOutput {
            files,
            report: BuildReport {
                pages_built,
                failures,
                duration,
            },
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Output filenames become publish paths, so a slug must stay a plain path
/// segment.
fn check_slug(page: &Page) -> Result<(), BuildError> {
    let slug = page.slug.as_str();
    let reason = if slug.is_empty() {
        "empty slug"
    } else if slug.contains(['/', '\\']) {
        "slug contains a path separator"
    } else if slug.starts_with('.') {
        "slug starts with '.'"
    } else {
        return Ok(());
    };

    Err(BuildError::Page {
        slug: slug.to_owned(),
        reason: reason.to_owned(),
    })
}

/// Global stylesheet: themed base CSS, with a `:root` override block
/// prepended when the site has custom colors.
fn global_css(site: &Site, template: &Template) -> String {
    let base = template.base_css.as_deref().unwrap_or(DEFAULT_CSS);
    let css = apply_custom_colors(base, site, template);
    if site.custom_colors.is_empty() {
        return css;
    }

    // Sorted for deterministic output; the backing map has no stable order.
    let mut colors: Vec<(&str, &str)> = site
        .custom_colors
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    colors.sort_unstable();

    let declarations: Vec<String> = colors
        .into_iter()
        .map(|(name, value)| format!("--{name}: {value};"))
        .collect();
    format!(":root {{ {} }}\n{css}", declarations.join("\n"))
}

#[cfg(test)]
mod tests {
    use mason_catalog::MemoryCatalog;
    use mason_model::TemplateFootprint;
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(SiteBuilder<'static>: Send, Sync);

    fn site() -> Site {
        Site {
            id: 7,
            domain: "acme.example".to_owned(),
            brand_name: "Acme".to_owned(),
            template_id: 1,
            enable_page_speed: false,
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

    fn page(id: i64, slug: &str, order: i32) -> Page {
        Page {
            id,
            site_id: 7,
            slug: slug.to_owned(),
            title: slug.to_owned(),
            order,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_skips_unpublished_pages() {
        let mut draft = page(3, "draft", 2);
        draft.is_published = false;
        let catalog = MemoryCatalog::new()
            .with_site(site())
            .with_template(template())
            .with_page(page(1, "home", 0))
            .with_page(page(2, "about", 1))
            .with_page(draft);

        let output = SiteBuilder::new(&catalog).build(7).unwrap();

        let names: Vec<&str> = output.files.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["about.html", "index.html", "styles.css"]);
        assert_eq!(output.report.pages_built, 2);
        assert!(output.report.failures.is_empty());
        assert!(!output.files["index.html"].contains("/draft"));
    }

    #[test]
    fn test_build_writes_default_css_without_base_css() {
        let catalog = MemoryCatalog::new()
            .with_site(site())
            .with_template(template())
            .with_page(page(1, "home", 0));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();

        assert!(output.files["styles.css"].contains(".gallery-grid"));
    }

    #[test]
    fn test_build_adds_scripts_only_with_base_js() {
        let mut with_js = template();
        with_js.base_js = Some("console.log('hi');".to_owned());
        let catalog = MemoryCatalog::new()
            .with_site(site())
            .with_template(with_js)
            .with_page(page(1, "home", 0));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();
        assert_eq!(
            output.files.get("scripts.js").map(String::as_str),
            Some("console.log('hi');")
        );

        let catalog = MemoryCatalog::new()
            .with_site(site())
            .with_template(template())
            .with_page(page(1, "home", 0));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();
        assert!(!output.files.contains_key("scripts.js"));
    }

    #[test]
    fn test_build_prepends_root_block_and_applies_theme() {
        let mut themed = site();
        themed
            .custom_colors
            .insert("primary".to_owned(), "#ff0000".to_owned());
        let mut template = template();
        template.base_css = Some("--primary: #111111;".to_owned());
        let catalog = MemoryCatalog::new()
            .with_site(themed)
            .with_template(template)
            .with_page(page(1, "home", 0));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();

        assert_eq!(
            output.files["styles.css"],
            ":root { --primary: #ff0000; }\n--primary: #ff0000;"
        );
    }

    #[test]
    fn test_build_reuses_existing_class_prefix() {
        let mut prefixed = site();
        prefixed.unique_class_prefix = Some("site-7-1700000000-abcxyz".to_owned());
        let mut template = template();
        template.base_html = Some("<div class=\"hero\">{{content}}</div>".to_owned());
        let catalog = MemoryCatalog::new()
            .with_site(prefixed)
            .with_template(template)
            .with_page(page(1, "home", 0));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();

        assert!(
            output.files["index.html"].contains("class=\"site-7-1700000000-abcxyz-hero\"")
        );
    }

    #[test]
    fn test_build_claims_prefix_once_and_reuses_it() {
        let catalog = MemoryCatalog::new()
            .with_site(site())
            .with_template(template())
            .with_page(page(1, "home", 0));
        let builder = SiteBuilder::new(&catalog);

        builder.build(7).unwrap();
        let claimed = catalog.site(7).unwrap().unique_class_prefix.unwrap();
        let pattern = regex::Regex::new(r"^site-7-\d+-[a-z]{6}$").unwrap();
        assert!(pattern.is_match(&claimed), "unexpected prefix: {claimed}");

        builder.build(7).unwrap();
        let after_rebuild = catalog.site(7).unwrap().unique_class_prefix.unwrap();
        assert_eq!(after_rebuild, claimed);
    }

    #[test]
    fn test_build_skips_page_with_unsafe_slug() {
        let catalog = MemoryCatalog::new()
            .with_site(site())
            .with_template(template())
            .with_page(page(1, "home", 0))
            .with_page(page(2, "../escape", 1));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();

        assert_eq!(output.report.pages_built, 1);
        assert_eq!(output.report.failures.len(), 1);
        assert_eq!(output.report.failures[0].slug, "../escape");
        assert!(output.files.contains_key("index.html"));
    }

    #[test]
    fn test_build_reports_filename_collision() {
        let catalog = MemoryCatalog::new()
            .with_site(site())
            .with_template(template())
            .with_page(page(1, "home", 0))
            .with_page(page(2, "index", 1));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();

        assert_eq!(output.report.pages_built, 1);
        assert_eq!(output.report.failures.len(), 1);
        assert_eq!(output.report.failures[0].slug, "index");
        assert!(output.report.failures[0].error.contains("index.html"));
    }

    #[test]
    fn test_build_rejects_foreign_footprint_before_rendering() {
        let mut misconfigured = site();
        misconfigured.footprint_id = Some(3);
        let footprint = TemplateFootprint {
            id: 3,
            template_id: 99,
            name: "wp".to_owned(),
            ..Default::default()
        };
        let catalog = MemoryCatalog::new()
            .with_site(misconfigured)
            .with_template(template())
            .with_footprint(footprint)
            .with_page(page(1, "home", 0));

        let err = SiteBuilder::new(&catalog).build(7).unwrap_err();

        assert!(matches!(err, BuildError::Config(_)));
    }

    #[test]
    fn test_build_fails_on_missing_template() {
        let catalog = MemoryCatalog::new().with_site(site());

        let err = SiteBuilder::new(&catalog).build(7).unwrap_err();

        assert!(matches!(err, BuildError::Catalog(_)));
    }

    #[test]
    fn test_build_places_assets_at_footprint_paths() {
        let mut with_footprint = site();
        with_footprint.footprint_id = Some(3);
        let footprint = TemplateFootprint {
            id: 3,
            template_id: 1,
            name: "wp".to_owned(),
            ..Default::default()
        };
        let mut template = template();
        template.base_js = Some("console.log('hi');".to_owned());
        let catalog = MemoryCatalog::new()
            .with_site(with_footprint)
            .with_template(template)
            .with_footprint(footprint)
            .with_page(page(1, "home", 0));

        let output = SiteBuilder::new(&catalog).build(7).unwrap();

        assert!(output.files.contains_key("assets/css/style.css"));
        assert!(output.files.contains_key("assets/js/script.js"));
        assert!(!output.files.contains_key("styles.css"));
    }
}
