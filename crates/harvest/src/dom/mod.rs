// ABOUTME: Read-only query capability over a rendered page: DocumentSnapshot and ElementQuery traits.
// ABOUTME: Also hosts the text helpers (whitespace collapsing, char-based truncation) shared by extractors.

//! Document query capability.
//!
//! Extractors never touch a concrete DOM library directly. They see a page
//! through two small traits:
//!
//! - [`DocumentSnapshot`]: one immutable page, its URL, its root element and
//!   the rules for resolving relative references.
//! - [`ElementQuery`]: CSS-selector queries and text/attribute access on a
//!   single element.
//!
//! [`HtmlSnapshot`] implements both on top of `scraper`.

pub mod snapshot;

pub use snapshot::HtmlSnapshot;

/// Query operations on one element of a snapshot.
///
/// Handles are cheap copies that borrow from their snapshot. Descendant
/// queries (`query_all`, `query_one`) never yield the scope element itself,
/// except on the document root, which answers for the whole document like
/// `document.querySelectorAll`. `closest` includes the element, like the
/// DOM's `Element.closest`.
///
/// A selector that fails to parse matches nothing.
pub trait ElementQuery: Copy {
    /// All descendants matching `selector`, in document order.
    fn query_all(self, selector: &str) -> Vec<Self>;

    /// First descendant matching `selector`.
    fn query_one(self, selector: &str) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    /// Nearest element matching `selector`, starting with `self` and walking up.
    fn closest(self, selector: &str) -> Option<Self>;

    /// Rendered text, whitespace collapsed and trimmed.
    fn inner_text(self) -> String;

    /// Raw attribute value.
    fn attribute(self, name: &str) -> Option<String>;

    /// Upper-case tag name, e.g. `H2`.
    fn tag_name(self) -> String;
}

/// An immutable view of one rendered page.
pub trait DocumentSnapshot {
    type Element<'a>: ElementQuery
    where
        Self: 'a;

    /// URL the snapshot was loaded from (after redirects).
    fn url(&self) -> &str;

    /// The document element (`<html>`).
    fn root(&self) -> Self::Element<'_>;

    /// Resolves an `href`/`src` value to an absolute URL.
    ///
    /// An empty reference resolves to the document's base URL, as `a.href`
    /// does. Returns `None` only when nothing usable remains.
    fn resolve_url(&self, reference: &str) -> Option<String>;
}

/// Collapses runs of ASCII whitespace into single spaces and trims the ends.
///
/// Non-breaking spaces inside the text survive, as they do in `innerText`;
/// only the final trim strips them from the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_ascii_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Number of chars in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Keeps at most `max` chars of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
