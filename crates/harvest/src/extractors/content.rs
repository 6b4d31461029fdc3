// ABOUTME: Heading, paragraph, link and image strategies: one document-wide pass each with length/shape filters.
// ABOUTME: Filters drop navigation chrome and placeholders; kept values are truncated to their caps.

use tracing::debug;

use crate::dom::{char_len, truncate_chars, DocumentSnapshot, ElementQuery};
use crate::options::Limits;
use crate::result::{Heading, HeadingLevel, ImageItem, LinkItem};

/// `h1`–`h3` whose text length fits the heading window.
pub fn extract_headings<D: DocumentSnapshot>(doc: &D, limits: &Limits) -> Vec<Heading> {
    let headings: Vec<Heading> = doc
        .root()
        .query_all("h1, h2, h3")
        .into_iter()
        .filter_map(|el| {
            let text = el.inner_text();
            if !limits.heading_text.admits(char_len(&text)) {
                return None;
            }
            let level = HeadingLevel::from_tag(&el.tag_name())?;
            Some(Heading { level, text })
        })
        .collect();

    debug!(count = headings.len(), "heading strategy");
    headings
}

/// `p` elements long enough to be prose but short of whole-page dumps.
pub fn extract_paragraphs<D: DocumentSnapshot>(doc: &D, limits: &Limits) -> Vec<String> {
    let paragraphs: Vec<String> = doc
        .root()
        .query_all("p")
        .into_iter()
        .filter_map(|el| {
            let text = el.inner_text();
            limits
                .paragraph_text
                .admits(char_len(&text))
                .then(|| truncate_chars(&text, limits.paragraph_max_chars))
        })
        .collect();

    debug!(count = paragraphs.len(), "paragraph strategy");
    paragraphs
}

/// Anchors with a navigable `href` and a meaningful label.
pub fn extract_links<D: DocumentSnapshot>(doc: &D, limits: &Limits) -> Vec<LinkItem> {
    let links: Vec<LinkItem> = doc
        .root()
        .query_all("a[href]")
        .into_iter()
        .filter_map(|el| {
            let text = el.inner_text();
            if !limits.link_text.admits(char_len(&text)) {
                return None;
            }
            let url = el.attribute("href").and_then(|href| doc.resolve_url(&href))?;
            if is_script_url(&url) {
                return None;
            }
            Some(LinkItem {
                text: truncate_chars(&text, limits.link_text_max_chars),
                url,
            })
        })
        .collect();

    debug!(count = links.len(), "link strategy");
    links
}

/// `img` elements with a fetchable (non-inline) source.
pub fn extract_images<D: DocumentSnapshot>(doc: &D, limits: &Limits) -> Vec<ImageItem> {
    let images: Vec<ImageItem> = doc
        .root()
        .query_all("img[src]")
        .into_iter()
        .filter_map(|el| {
            let src = el.attribute("src").and_then(|src| doc.resolve_url(&src))?;
            if is_embedded_source(&src) {
                return None;
            }
            let alt = el.attribute("alt").unwrap_or_default();
            Some(ImageItem {
                src,
                alt: truncate_chars(&alt, limits.image_alt_max_chars),
            })
        })
        .collect();

    debug!(count = images.len(), "image strategy");
    images
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// `javascript:` pseudo-links.
fn is_script_url(url: &str) -> bool {
    starts_with_ignore_case(url.trim_start(), "javascript:")
}

/// Inline `data:` payloads.
fn is_embedded_source(src: &str) -> bool {
    starts_with_ignore_case(src.trim_start(), "data:") || src.contains("data:image")
}
