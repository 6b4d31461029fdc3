// ABOUTME: Extraction orchestrator: runs every strategy over one snapshot, dedups articles, assembles the envelope.
// ABOUTME: Stateless and synchronous; only a loader failure handed in by the caller produces a Failure outcome.

//! Extraction engine.
//!
//! [`extract`] is pure: it reads one snapshot, runs the six strategies as
//! independent passes and returns an [`Extraction`]. [`assemble`] stamps the
//! result (or the loader's error) into an [`ExtractionOutcome`]. [`run`] does
//! both for callers that hold a loader result.

use std::fmt;

use tracing::{debug, warn};

use crate::dedup::dedup_articles;
use crate::dom::DocumentSnapshot;
use crate::extractors::{
    extract_articles, extract_headings, extract_images, extract_links, extract_metadata,
    extract_page_info, extract_paragraphs, DEFAULT_ARTICLE_SELECTORS,
};
use crate::options::ExtractOptions;
use crate::result::{ContentBundle, Extraction, ExtractionOutcome};

/// Runs all strategies against `doc`.
pub fn extract<D: DocumentSnapshot>(doc: &D, opts: &ExtractOptions) -> Extraction {
    let bounded = opts.limits.bounded();
    let limits = &bounded;

    let raw_articles = match opts.custom_selectors() {
        Some(custom) => extract_articles(doc, custom, limits),
        None => extract_articles(doc, DEFAULT_ARTICLE_SELECTORS, limits),
    };

    let content = ContentBundle {
        articles: dedup_articles(raw_articles, limits.max_articles),
        headings: extract_headings(doc, limits),
        paragraphs: extract_paragraphs(doc, limits),
        links: extract_links(doc, limits),
        images: extract_images(doc, limits),
        metadata: extract_metadata(doc),
    };

    debug!(
        url = doc.url(),
        articles = content.articles.len(),
        headings = content.headings.len(),
        paragraphs = content.paragraphs.len(),
        links = content.links.len(),
        images = content.images.len(),
        "extraction finished"
    );

    Extraction {
        page: extract_page_info(doc),
        content,
        screenshot: None,
    }
}

/// Wraps an extraction, or the loader error that prevented it, into an envelope.
///
/// The timestamp is taken here, at assembly time.
pub fn assemble<E: fmt::Display>(requested_url: &str, extraction: Result<Extraction, E>) -> ExtractionOutcome {
    match extraction {
        Ok(extraction) => ExtractionOutcome::success(extraction),
        Err(err) => {
            let message = err.to_string();
            warn!(url = requested_url, error = %message, "page load failed");
            ExtractionOutcome::failure(message, requested_url)
        }
    }
}

/// Extracts from a loaded snapshot, or reports why loading failed.
pub fn run<D, E>(requested_url: &str, loaded: Result<D, E>, opts: &ExtractOptions) -> ExtractionOutcome
where
    D: DocumentSnapshot,
    E: fmt::Display,
{
    assemble(requested_url, loaded.map(|doc| extract(&doc, opts)))
}
