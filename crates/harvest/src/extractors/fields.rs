// ABOUTME: Single-field extractors (article title/link/date/excerpt, page title/description, meta values).
// ABOUTME: Each field is an ordered probe list run through the first-match combinator.

//! Field extractors.
//!
//! Every function here reads one semantic field relative to a scope element
//! and returns `None` when the page does not carry it. Callers decide the
//! default (always the empty string for the result model).

use crate::dom::DocumentSnapshot;
use crate::extractors::select::{first_match, Probe};

/// Headline candidates inside an article container.
pub const TITLE_SELECTOR: &str =
    r#"h1, h2, h3, h4, [class*="title"], [class*="headline"]"#;

/// Date or time markers inside an article container.
pub const DATE_SELECTOR: &str = r#"time, [datetime], [class*="date"], [class*="time"]"#;

/// Teaser text inside an article container.
pub const EXCERPT_SELECTOR: &str =
    r#"p, [class*="excerpt"], [class*="summary"], [class*="description"]"#;

const ARTICLE_TITLE: &[Probe<'static>] = &[Probe::Text(TITLE_SELECTOR), Probe::Text("a")];
const ARTICLE_LINK: &[Probe<'static>] = &[Probe::Href("a"), Probe::ClosestHref("a")];
const ARTICLE_DATE: &[Probe<'static>] = &[
    Probe::Text(DATE_SELECTOR),
    Probe::Attr(DATE_SELECTOR, "datetime"),
];
const ARTICLE_EXCERPT: &[Probe<'static>] = &[Probe::Text(EXCERPT_SELECTOR)];

const PAGE_TITLE: &[Probe<'static>] = &[Probe::Text("title")];
const PAGE_DESCRIPTION: &[Probe<'static>] = &[
    Probe::Attr(r#"meta[name="description"]"#, "content"),
    Probe::Attr(r#"meta[property="og:description"]"#, "content"),
];

pub(crate) const OG_TITLE: &[Probe<'static>] =
    &[Probe::Attr(r#"meta[property="og:title"]"#, "content")];
pub(crate) const OG_DESCRIPTION: &[Probe<'static>] =
    &[Probe::Attr(r#"meta[property="og:description"]"#, "content")];
pub(crate) const OG_IMAGE: &[Probe<'static>] =
    &[Probe::Attr(r#"meta[property="og:image"]"#, "content")];
pub(crate) const AUTHOR: &[Probe<'static>] = &[
    Probe::Attr(r#"meta[name="author"]"#, "content"),
    Probe::Text(r#"[class*="author"]"#),
];
pub(crate) const PUBLISHED_DATE: &[Probe<'static>] = &[
    Probe::Attr(r#"meta[property="article:published_time"]"#, "content"),
    Probe::Attr(r#"meta[name="publishedDate"]"#, "content"),
];

/// Headline of a container, falling back to its first anchor's text.
pub fn article_title<'d, D: DocumentSnapshot>(doc: &'d D, container: D::Element<'d>) -> Option<String> {
    first_match(doc, container, ARTICLE_TITLE)
}

/// Absolute URL of the container's first anchor, else of the anchor wrapping it.
pub fn article_link<'d, D: DocumentSnapshot>(doc: &'d D, container: D::Element<'d>) -> Option<String> {
    first_match(doc, container, ARTICLE_LINK)
}

/// Visible date text, or the marker's `datetime` attribute when it renders nothing.
pub fn article_date<'d, D: DocumentSnapshot>(doc: &'d D, container: D::Element<'d>) -> Option<String> {
    first_match(doc, container, ARTICLE_DATE)
}

pub fn article_excerpt<'d, D: DocumentSnapshot>(doc: &'d D, container: D::Element<'d>) -> Option<String> {
    first_match(doc, container, ARTICLE_EXCERPT)
}

/// Text of the document `<title>`.
pub fn page_title<D: DocumentSnapshot>(doc: &D) -> Option<String> {
    first_match(doc, doc.root(), PAGE_TITLE)
}

/// `meta[name=description]`, then `og:description`.
pub fn page_description<D: DocumentSnapshot>(doc: &D) -> Option<String> {
    first_match(doc, doc.root(), PAGE_DESCRIPTION)
}

/// Runs a document-level probe list.
pub fn document_field<D: DocumentSnapshot>(doc: &D, probes: &[Probe<'_>]) -> Option<String> {
    first_match(doc, doc.root(), probes)
}
