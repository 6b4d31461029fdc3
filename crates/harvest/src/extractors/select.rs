// ABOUTME: Ordered-fallback "first match" combinator over selector probes.
// ABOUTME: A probe names a selector and how to read a value from its first match; first non-empty value wins.

//! First-match field extraction.
//!
//! Fields on arbitrary pages have no fixed location, so each one is described
//! as an ordered list of [`Probe`]s. [`first_match`] evaluates them in order
//! and stops at the first one that yields a non-empty value.
//!
//! Each probe looks at the *first* element its selector matches; it does not
//! keep scanning later matches when that element is empty. A fallback to a
//! different element must be spelled out as another probe.

use crate::dom::{DocumentSnapshot, ElementQuery};

/// One way of reading a field value relative to a scope element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<'s> {
    /// Rendered text of the first descendant matching the selector.
    Text(&'s str),
    /// Attribute of the first descendant matching the selector.
    Attr(&'s str, &'s str),
    /// Absolute `href` of the first descendant matching the selector.
    Href(&'s str),
    /// Absolute `href` of the nearest ancestor-or-self matching the selector.
    ClosestHref(&'s str),
}

/// Evaluates `probes` in order against `scope`; returns the first non-empty trimmed value.
pub fn first_match<'d, D>(doc: &'d D, scope: D::Element<'d>, probes: &[Probe<'_>]) -> Option<String>
where
    D: DocumentSnapshot,
{
    probes
        .iter()
        .find_map(|probe| evaluate(doc, scope, *probe).filter(|v| !v.is_empty()))
}

fn evaluate<'d, D>(doc: &'d D, scope: D::Element<'d>, probe: Probe<'_>) -> Option<String>
where
    D: DocumentSnapshot,
{
    match probe {
        Probe::Text(css) => scope.query_one(css).map(|el| el.inner_text()),
        Probe::Attr(css, attr) => scope
            .query_one(css)
            .and_then(|el| el.attribute(attr))
            .map(|v| v.trim().to_string()),
        Probe::Href(css) => scope
            .query_one(css)
            .and_then(|el| el.attribute("href"))
            .and_then(|href| doc.resolve_url(&href)),
        Probe::ClosestHref(css) => scope
            .closest(css)
            .and_then(|el| el.attribute("href"))
            .and_then(|href| doc.resolve_url(&href)),
    }
}
