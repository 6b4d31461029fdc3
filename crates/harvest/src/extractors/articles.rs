// ABOUTME: Article strategy: walks ordered container selectors and builds ArticleCandidates from each match.
// ABOUTME: Applies the title length window and truncation; duplicates across selectors are left for dedup.

use tracing::debug;

use crate::dom::{char_len, truncate_chars, DocumentSnapshot, ElementQuery};
use crate::extractors::fields::{article_date, article_excerpt, article_link, article_title};
use crate::options::Limits;
use crate::result::ArticleCandidate;

/// Container selectors tried when the caller supplies none.
pub const DEFAULT_ARTICLE_SELECTORS: &[&str] = &[
    "article",
    r#"[class*="article"]"#,
    r#"[class*="blog"]"#,
    r#"[class*="news"]"#,
    r#"[class*="post"]"#,
    ".card",
    ".item",
    r#"[role="article"]"#,
];

/// Collects article candidates for every selector in order.
///
/// The same element may be yielded once per selector it matches; that is
/// expected here and collapsed later by [`crate::dedup::dedup_articles`].
pub fn extract_articles<D, S>(doc: &D, selectors: &[S], limits: &Limits) -> Vec<ArticleCandidate>
where
    D: DocumentSnapshot,
    S: AsRef<str>,
{
    let root = doc.root();
    let mut candidates = Vec::new();

    for selector in selectors {
        let selector = selector.as_ref();
        let containers = root.query_all(selector);
        let before = candidates.len();

        candidates.extend(
            containers
                .iter()
                .filter_map(|container| build_candidate(doc, *container, limits)),
        );

        debug!(
            selector,
            containers = containers.len(),
            accepted = candidates.len() - before,
            "article selector pass"
        );
    }

    candidates
}

/// Reads one container; `None` when it has no acceptable title.
fn build_candidate<'d, D>(doc: &'d D, container: D::Element<'d>, limits: &Limits) -> Option<ArticleCandidate>
where
    D: DocumentSnapshot,
{
    let title = article_title(doc, container)?;
    if title.is_empty() || !limits.article_title.admits(char_len(&title)) {
        return None;
    }

    let excerpt = article_excerpt(doc, container)
        .map(|text| truncate_chars(&text, limits.article_excerpt_max_chars))
        .unwrap_or_default();

    Some(ArticleCandidate {
        title: truncate_chars(&title, limits.article_title_max_chars),
        link: article_link(doc, container).unwrap_or_default(),
        date: article_date(doc, container).unwrap_or_default(),
        excerpt,
    })
}
