//! Page assembly: template shell to complete HTML document.
//!
//! The assembler owns the per-site state every page of a build shares: the
//! navigation fragment built from the published-page snapshot, the resolved
//! variable set and the adopted class prefix. Per-page work is then a pure
//! function, so pages can be assembled in parallel.

use std::fmt::Write;

use mason_model::{Page, PageBlock, Site, Template, TemplateFootprint};
use mason_render::{VariableResolver, escape, optimize_images, prefix_classes, render_block};

/// Fallback document shell used when a template has no `base_html`.
const DEFAULT_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{page_title}} - {{brand_name}}</title>
    <meta name="description" content="{{meta_description}}">
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
    {{navigation}}
    <main>
        {{content}}
    </main>
    {{footer}}
    <script src="/scripts.js"></script>
</body>
</html>
"#;

/// Assembles complete HTML documents for one site's pages.
pub struct PageAssembler<'a> {
    site: &'a Site,
    template: &'a Template,
    footer_html: &'a str,
    navigation: String,
    resolver: VariableResolver,
    class_prefix: &'a str,
}

impl<'a> PageAssembler<'a> {
    /// Create an assembler over a snapshot of the site's published pages.
    ///
    /// `nav_pages` must already be filtered to published pages and sorted by
    /// their `order` field; the navigation fragment is built once from this
    /// snapshot and never changes during a build.
    #[must_use]
    pub fn new(
        site: &'a Site,
        template: &'a Template,
        footprint: Option<&'a TemplateFootprint>,
        nav_pages: &[Page],
        class_prefix: &'a str,
    ) -> Self {
        Self {
            site,
            template,
            footer_html: footprint
                .and_then(|f| f.footer_html.as_deref())
                .unwrap_or(""),
            navigation: build_navigation(nav_pages),
            resolver: VariableResolver::new(site, template),
            class_prefix,
        }
    }

    /// Assemble one complete HTML document for a page.
    ///
    /// Page-scoped placeholders are substituted first, straight from the
    /// page and site records, so they resolve regardless of what the
    /// configurable variable set contains. The tolerant variable pass, the
    /// class rewriter and the image optimizer then run over the whole
    /// document; disabled passes fall through unchanged.
    #[must_use]
    pub fn assemble(&self, page: &Page) -> String {
        let mut html = self
            .template
            .base_html
            .clone()
            .unwrap_or_else(|| DEFAULT_HTML_TEMPLATE.to_owned());

        html = html.replace("{{brand_name}}", &self.site.brand_name);
        html = html.replace("{{page_title}}", &page.title);
        html = html.replace("{{meta_title}}", &page.meta_title);
        html = html.replace("{{meta_description}}", &page.meta_description);
        html = html.replace("{{page_h1}}", page.heading());

        html = html.replace("{{content}}", &render_blocks(&page.blocks));
        html = html.replace("{{navigation}}", &self.navigation);
        html = html.replace("{{footer}}", self.footer_html);

        let html = self.resolver.resolve(&html);
        let html = prefix_classes(&html, self.class_prefix);
        optimize_images(&html, self.site, self.template)
    }
}

/// Render a page's blocks in ascending `order_index`, joined by newlines.
fn render_blocks(blocks: &[PageBlock]) -> String {
    let mut ordered: Vec<&PageBlock> = blocks.iter().collect();
    ordered.sort_by_key(|block| block.order_index);

    let fragments: Vec<String> = ordered
        .iter()
        .map(|block| render_block(&block.content))
        .collect();
    fragments.join("\n")
}

/// One link per page in snapshot order, home mapping to the site root.
fn build_navigation(pages: &[Page]) -> String {
    let mut nav = String::from("<nav>");
    for page in pages {
        let _ = write!(
            nav,
            "<a href=\"{}\">{}</a>",
            page.href(),
            escape(&page.title)
        );
    }
    nav.push_str("</nav>");
    nav
}

#[cfg(test)]
mod tests {
    use mason_model::BlockContent;
    use pretty_assertions::assert_eq;

    use super::*;

    fn site() -> Site {
        Site {
            id: 1,
            domain: "acme.example".to_owned(),
            brand_name: "Acme".to_owned(),
            template_id: 1,
            enable_page_speed: false,
            ..Default::default()
        }
    }

    fn template(base_html: Option<&str>) -> Template {
        Template {
            id: 1,
            name: "Landing".to_owned(),
            base_html: base_html.map(str::to_owned),
            ..Default::default()
        }
    }

    fn page(slug: &str, title: &str, order: i32) -> Page {
        Page {
            id: i64::from(order),
            site_id: 1,
            slug: slug.to_owned(),
            title: title.to_owned(),
            order,
            ..Default::default()
        }
    }

    fn text_block(id: i64, order_index: i32, text: &str) -> PageBlock {
        PageBlock {
            id,
            order_index,
            content: BlockContent::Text {
                title: None,
                text: Some(text.to_owned()),
            },
        }
    }

    const PREFIX: &str = "site-1-1700000000-abcxyz";

    #[test]
    fn test_default_skeleton_used_without_base_html() {
        let site = site();
        let template = template(None);
        let home = page("home", "Home", 0);
        let assembler = PageAssembler::new(&site, &template, None, &[home.clone()], PREFIX);

        let html = assembler.assemble(&home);

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Home - Acme</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/styles.css\">"));
        assert!(!html.contains("{{content}}"));
        assert!(!html.contains("{{footer}}"));
    }

    #[test]
    fn test_page_scoped_placeholders_come_from_the_page() {
        let site = site();
        let template = template(Some(
            "{{brand_name}}|{{page_title}}|{{meta_title}}|{{meta_description}}|{{page_h1}}",
        ));
        let mut about = page("about", "About", 1);
        about.meta_title = "About Acme".to_owned();
        about.meta_description = "Who we are".to_owned();
        about.h1 = Some("The Acme story".to_owned());
        let assembler = PageAssembler::new(&site, &template, None, &[about.clone()], PREFIX);

        let html = assembler.assemble(&about);

        assert_eq!(html, "Acme|About|About Acme|Who we are|The Acme story");
    }

    #[test]
    fn test_blocks_render_in_order_index_order() {
        let site = site();
        let template = template(Some("{{content}}"));
        let mut home = page("home", "Home", 0);
        home.blocks = vec![
            text_block(1, 2, "second"),
            text_block(2, 0, "first"),
            text_block(3, 1, "middle"),
        ];
        let assembler = PageAssembler::new(&site, &template, None, &[home.clone()], PREFIX);

        let html = assembler.assemble(&home);

        let first = html.find("first").unwrap();
        let middle = html.find("middle").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < middle && middle < second);
        assert_eq!(html.matches("</section>\n<section").count(), 2);
    }

    #[test]
    fn test_navigation_links_snapshot_pages_in_order() {
        let site = site();
        let template = template(Some("{{navigation}}"));
        let home = page("home", "Home", 0);
        let pricing = page("pricing", "Pricing", 1);
        let assembler = PageAssembler::new(
            &site,
            &template,
            None,
            &[home.clone(), pricing],
            PREFIX,
        );

        let html = assembler.assemble(&home);

        assert_eq!(
            html,
            "<nav><a href=\"/\">Home</a><a href=\"/pricing\">Pricing</a></nav>"
        );
    }

    #[test]
    fn test_navigation_escapes_page_titles() {
        let site = site();
        let template = template(Some("{{navigation}}"));
        let spicy = page("faq", "Q & A", 0);
        let assembler = PageAssembler::new(&site, &template, None, &[spicy.clone()], PREFIX);

        let html = assembler.assemble(&spicy);

        assert_eq!(html, "<nav><a href=\"/faq\">Q &amp; A</a></nav>");
    }

    #[test]
    fn test_footer_substituted_from_footprint() {
        let site = site();
        let template = template(Some("{{footer}}"));
        let footprint = TemplateFootprint {
            id: 3,
            template_id: 1,
            name: "wp".to_owned(),
            footer_html: Some("<footer>made by hand</footer>".to_owned()),
            ..Default::default()
        };
        let home = page("home", "Home", 0);
        let assembler =
            PageAssembler::new(&site, &template, Some(&footprint), &[home.clone()], PREFIX);

        assert_eq!(assembler.assemble(&home), "<footer>made by hand</footer>");
    }

    #[test]
    fn test_footer_empty_without_footprint() {
        let site = site();
        let template = template(Some("before|{{footer}}|after"));
        let home = page("home", "Home", 0);
        let assembler = PageAssembler::new(&site, &template, None, &[home.clone()], PREFIX);

        assert_eq!(assembler.assemble(&home), "before||after");
    }

    #[test]
    fn test_variable_pass_runs_after_page_scoped_substitution() {
        let mut site = site();
        site.template_variables
            .insert("tagline".to_owned(), "Build faster".to_owned());
        let template = template(Some("{{tagline}} on {{domain}} {{unknown}}"));
        let home = page("home", "Home", 0);
        let assembler = PageAssembler::new(&site, &template, None, &[home.clone()], PREFIX);

        assert_eq!(
            assembler.assemble(&home),
            "Build faster on acme.example {{unknown}}"
        );
    }

    #[test]
    fn test_class_attributes_are_prefixed() {
        let site = site();
        let template = template(Some("<div class=\"hero\">x</div>"));
        let home = page("home", "Home", 0);
        let assembler = PageAssembler::new(&site, &template, None, &[home.clone()], PREFIX);

        assert_eq!(
            assembler.assemble(&home),
            "<div class=\"site-1-1700000000-abcxyz-hero\">x</div>"
        );
    }

    #[test]
    fn test_images_rewritten_when_page_speed_enabled() {
        let mut site = site();
        site.enable_page_speed = true;
        let template = template(Some("<img src=\"/a.png\" alt=\"A\">"));
        let home = page("home", "Home", 0);
        let assembler = PageAssembler::new(&site, &template, None, &[home.clone()], PREFIX);

        let html = assembler.assemble(&home);

        assert!(html.starts_with("<picture>"));
        assert!(html.contains("loading=\"lazy\""));
    }
}
