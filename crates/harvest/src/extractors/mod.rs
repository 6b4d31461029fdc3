// ABOUTME: Extraction strategies for arbitrary pages: articles, headings, paragraphs, links, images, metadata.
// ABOUTME: Built from single-field extractors layered over a first-match selector combinator.

//! Content extraction module.
//!
//! Submodules:
//! - `compiled`: process-wide cache of compiled selectors.
//! - `select`: the ordered-fallback `first_match` combinator.
//! - `fields`: single-field extractors built from probe lists.
//! - `articles`: the container-driven article strategy.
//! - `content`: heading, paragraph, link and image strategies.
//! - `metadata`: meta-tag metadata and page info.

pub mod articles;
pub mod compiled;
pub mod content;
pub mod fields;
pub mod metadata;
pub mod select;

pub use articles::{extract_articles, DEFAULT_ARTICLE_SELECTORS};
pub use content::{extract_headings, extract_images, extract_links, extract_paragraphs};
pub use metadata::{extract_metadata, extract_page_info};
