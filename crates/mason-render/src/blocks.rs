//! Block-to-fragment rendering.
//!
//! Pure mapping from a typed block payload to an HTML fragment; input is
//! never mutated. Unrecognized block types render to an empty string so a
//! single bad block cannot take the page down with it.
//!
//! Plain-text fields (titles, subtitles, alt text, captions, questions)
//! are escaped. Body fields (`text`, FAQ answers) pass through unescaped:
//! stored copy may carry its own markup.

use std::fmt::Write;

use mason_model::{BlockContent, FaqItem, GalleryImage, SwiperSlide};

use crate::escape::escape;

/// Render a single block to an HTML fragment.
#[must_use]
pub fn render_block(content: &BlockContent) -> String {
    let mut html = String::with_capacity(256);
    match content {
        BlockContent::Hero {
            title,
            subtitle,
            background_image,
            cta_text,
            cta_url,
        } => render_hero(
            &mut html,
            title.as_deref(),
            subtitle.as_deref(),
            background_image.as_deref(),
            cta_text.as_deref(),
            cta_url.as_deref(),
        ),
        BlockContent::Text { title, text } => {
            render_text(&mut html, title.as_deref(), text.as_deref());
        }
        BlockContent::Image {
            image_url,
            alt_text,
            caption,
        } => render_image(
            &mut html,
            image_url.as_deref(),
            alt_text.as_deref(),
            caption.as_deref(),
        ),
        BlockContent::Gallery { images } => render_gallery(&mut html, images),
        BlockContent::TextImage {
            title,
            text,
            image_url,
            alt_text,
            image_left,
        } => render_text_image(
            &mut html,
            title.as_deref(),
            text.as_deref(),
            image_url.as_deref(),
            alt_text.as_deref(),
            *image_left,
        ),
        BlockContent::Cta {
            title,
            text,
            button_text,
            button_url,
        } => render_cta(
            &mut html,
            title.as_deref(),
            text.as_deref(),
            button_text.as_deref(),
            button_url.as_deref(),
        ),
        BlockContent::Faq { items } => render_faq(&mut html, items),
        BlockContent::Swiper { slides } => render_swiper(&mut html, slides),
        BlockContent::Unknown => {}
    }
    html
}

fn render_hero(
    html: &mut String,
    title: Option<&str>,
    subtitle: Option<&str>,
    background_image: Option<&str>,
    cta_text: Option<&str>,
    cta_url: Option<&str>,
) {
    let _ = writeln!(
        html,
        "<section class=\"hero\" style=\"background-image: url('{}');\">",
        escape(background_image.unwrap_or("")),
    );
    html.push_str("<div class=\"hero-content\">\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape(title.unwrap_or("")));
    let _ = writeln!(html, "<p>{}</p>", escape(subtitle.unwrap_or("")));
    if let Some(cta_text) = non_empty(cta_text) {
        let _ = writeln!(
            html,
            "<a href=\"{}\" class=\"btn\">{}</a>",
            escape(cta_url.unwrap_or("#")),
            escape(cta_text),
        );
    }
    html.push_str("</div>\n</section>");
}

fn render_text(html: &mut String, title: Option<&str>, text: Option<&str>) {
    html.push_str("<section class=\"text-block\">\n<div class=\"container\">\n");
    if let Some(title) = non_empty(title) {
        let _ = writeln!(html, "<h2>{}</h2>", escape(title));
    }
    let _ = writeln!(
        html,
        "<div class=\"text-content\">{}</div>",
        text.unwrap_or(""),
    );
    html.push_str("</div>\n</section>");
}

fn render_image(
    html: &mut String,
    image_url: Option<&str>,
    alt_text: Option<&str>,
    caption: Option<&str>,
) {
    html.push_str("<section class=\"image-block\">\n<div class=\"container\">\n");
    let _ = writeln!(
        html,
        "<img src=\"{}\" alt=\"{}\" />",
        escape(image_url.unwrap_or("")),
        escape(alt_text.unwrap_or("")),
    );
    if let Some(caption) = non_empty(caption) {
        let _ = writeln!(html, "<p class=\"caption\">{}</p>", escape(caption));
    }
    html.push_str("</div>\n</section>");
}

fn render_gallery(html: &mut String, images: &[GalleryImage]) {
    html.push_str("<section class=\"gallery-block\">\n<div class=\"container\">\n");
    html.push_str("<div class=\"gallery-grid\">");
    for image in images {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"{}\" />",
            escape(&image.url),
            escape(&image.alt),
        );
    }
    html.push_str("</div>\n</div>\n</section>");
}

fn render_text_image(
    html: &mut String,
    title: Option<&str>,
    text: Option<&str>,
    image_url: Option<&str>,
    alt_text: Option<&str>,
    image_left: bool,
) {
    let side = if image_left { "image-left" } else { "image-right" };
    let _ = writeln!(html, "<section class=\"text-image-block {side}\">");
    html.push_str("<div class=\"container\">\n");
    let _ = writeln!(
        html,
        "<img src=\"{}\" alt=\"{}\" />",
        escape(image_url.unwrap_or("")),
        escape(alt_text.unwrap_or("")),
    );
    html.push_str("<div class=\"text-image-copy\">\n");
    if let Some(title) = non_empty(title) {
        let _ = writeln!(html, "<h2>{}</h2>", escape(title));
    }
    let _ = writeln!(
        html,
        "<div class=\"text-content\">{}</div>",
        text.unwrap_or(""),
    );
    html.push_str("</div>\n</div>\n</section>");
}

fn render_cta(
    html: &mut String,
    title: Option<&str>,
    text: Option<&str>,
    button_text: Option<&str>,
    button_url: Option<&str>,
) {
    html.push_str("<section class=\"cta-block\">\n<div class=\"container\">\n");
    if let Some(title) = non_empty(title) {
        let _ = writeln!(html, "<h2>{}</h2>", escape(title));
    }
    if let Some(text) = non_empty(text) {
        let _ = writeln!(html, "<p>{}</p>", escape(text));
    }
    if let Some(button_text) = non_empty(button_text) {
        let _ = writeln!(
            html,
            "<a href=\"{}\" class=\"btn\">{}</a>",
            escape(button_url.unwrap_or("#")),
            escape(button_text),
        );
    }
    html.push_str("</div>\n</section>");
}

fn render_faq(html: &mut String, items: &[FaqItem]) {
    html.push_str("<section class=\"faq-block\">\n<div class=\"container\">\n");
    for item in items {
        html.push_str("<div class=\"faq-item\">\n");
        let _ = writeln!(
            html,
            "<h3 class=\"faq-question\">{}</h3>",
            escape(&item.question),
        );
        let _ = writeln!(html, "<div class=\"faq-answer\">{}</div>", item.answer);
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>");
}

fn render_swiper(html: &mut String, slides: &[SwiperSlide]) {
    html.push_str("<section class=\"swiper-block\">\n<div class=\"swiper-wrapper\">\n");
    for slide in slides {
        html.push_str("<div class=\"swiper-slide\">\n");
        let _ = writeln!(
            html,
            "<img src=\"{}\" alt=\"{}\" />",
            escape(&slide.image),
            escape(&slide.title),
        );
        let _ = writeln!(html, "<h3>{}</h3>", escape(&slide.title));
        let _ = writeln!(html, "<p>{}</p>", escape(&slide.description));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</section>");
}

/// Treat missing and empty strings the same way: both mean "not provided".
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
