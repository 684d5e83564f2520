//! Pages and their ordered content blocks.

use serde::{Deserialize, Serialize};

use crate::BlockContent;

/// A typed, ordered content unit belonging to a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBlock {
    pub id: i64,
    /// Position within the page, ascending.
    #[serde(default)]
    pub order_index: i32,
    #[serde(flatten)]
    pub content: BlockContent,
}

/// A site-scoped document.
///
/// Slugs are unique within a site. The slug `home` is special-cased: it
/// produces the site's root document and links to `/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub site_id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub h1: Option<String>,
    /// Position in navigation, ascending.
    #[serde(default)]
    pub order: i32,
    #[serde(default = "default_true")]
    pub is_published: bool,
    #[serde(default)]
    pub blocks: Vec<PageBlock>,
}

impl Page {
    /// Output filename for this page.
    #[must_use]
    pub fn output_filename(&self) -> String {
        if self.slug == "home" {
            "index.html".to_owned()
        } else {
            format!("{}.html", self.slug)
        }
    }

    /// Navigation href for this page.
    #[must_use]
    pub fn href(&self) -> String {
        if self.slug == "home" {
            "/".to_owned()
        } else {
            format!("/{}", self.slug)
        }
    }

    /// Heading text for the page, falling back to the title.
    #[must_use]
    pub fn heading(&self) -> &str {
        self.h1.as_deref().unwrap_or(&self.title)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            id: 0,
            site_id: 0,
            slug: String::new(),
            title: String::new(),
            meta_title: String::new(),
            meta_description: String::new(),
            h1: None,
            order: 0,
            is_published: true,
            blocks: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
