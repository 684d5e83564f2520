//! Typed page-block payloads.
//!
//! [`BlockContent`] mirrors the stored wire shape of a block: a
//! `block_type` discriminator next to a `content_data` payload.
//! Unrecognized types deserialize to [`BlockContent::Unknown`], which
//! renders to nothing, so one bad block never sinks a whole page.

use serde::{Deserialize, Deserializer, Serialize};

/// A single image in a gallery grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// One question/answer entry of an FAQ block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// One slide of a swiper block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwiperSlide {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// Typed content payload of a page block.
///
/// The `text` type also accepts the legacy `article` name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "block_type", content = "content_data", rename_all = "snake_case")]
pub enum BlockContent {
    Hero {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        subtitle: Option<String>,
        #[serde(default)]
        background_image: Option<String>,
        #[serde(default)]
        cta_text: Option<String>,
        #[serde(default)]
        cta_url: Option<String>,
    },
    #[serde(alias = "article")]
    Text {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    Image {
        #[serde(default)]
        image_url: Option<String>,
        #[serde(default)]
        alt_text: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    Gallery {
        #[serde(default)]
        images: Vec<GalleryImage>,
    },
    TextImage {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        image_url: Option<String>,
        #[serde(default)]
        alt_text: Option<String>,
        /// Image on the left of the copy; right otherwise.
        #[serde(default)]
        image_left: bool,
    },
    Cta {
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        button_text: Option<String>,
        #[serde(default)]
        button_url: Option<String>,
    },
    Faq {
        #[serde(default)]
        items: Vec<FaqItem>,
    },
    Swiper {
        #[serde(default)]
        slides: Vec<SwiperSlide>,
    },
    /// Any block type this pipeline does not recognize.
    #[serde(other, deserialize_with = "ignore_content")]
    Unknown,
}

/// Discard the `content_data` payload of an unrecognized block.
///
/// `#[serde(other)]` only matches the tag; under adjacent tagging any
/// accompanying content is still handed to the unit variant, which would
/// reject it, so the variant routes the payload here to be consumed and
/// ignored.
fn ignore_content<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer).map(|_| ())
}

impl BlockContent {
    /// Stable type name matching the stored `block_type` discriminator.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Hero { .. } => "hero",
            Self::Text { .. } => "text",
            Self::Image { .. } => "image",
            Self::Gallery { .. } => "gallery",
            Self::TextImage { .. } => "text_image",
            Self::Cta { .. } => "cta",
            Self::Faq { .. } => "faq",
            Self::Swiper { .. } => "swiper",
            Self::Unknown => "unknown",
        }
    }
}
