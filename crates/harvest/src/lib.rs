// ABOUTME: Main library entry point for the harvest multi-strategy page extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, the engine functions, options, result and error types.

//! Harvest - heuristic structured-content extraction from arbitrary web pages.
//!
//! A page is loaded once, then six independent strategies read it: article
//! containers, headings, paragraphs, links, images and meta-tag metadata.
//! Articles found by overlapping container selectors are deduplicated, and
//! the whole result is wrapped in a success/failure envelope stamped with the
//! time of assembly.
//!
//! # Example
//!
//! ```no_run
//! use digests_harvest::Client;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::builder().build();
//!     let outcome = client.scrape("https://example.com/news").await;
//!     println!("{}", serde_json::to_string_pretty(&outcome).unwrap_or_default());
//! }
//! ```
//!
//! Documents already in memory skip the loader:
//!
//! ```
//! use digests_harvest::{extract, ExtractOptions, HtmlSnapshot};
//!
//! let doc = HtmlSnapshot::new("<article><h2>A headline</h2></article>", "https://example.com/");
//! let extraction = extract(&doc, &ExtractOptions::default());
//! assert_eq!(extraction.content.articles[0].title, "A headline");
//! ```

pub mod client;
pub mod dedup;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extractors;
pub mod options;
pub mod resource;
pub mod result;

pub use crate::client::Client;
pub use crate::dedup::{dedup_articles, OrderedMap};
pub use crate::dom::{DocumentSnapshot, ElementQuery, HtmlSnapshot};
pub use crate::engine::{assemble, extract, run};
pub use crate::error::{ErrorCode, LoadError};
pub use crate::options::{
    ClientBuilder, ExtractOptions, LengthRange, Limits, Options, MAX_ARTICLES,
    MAX_ARTICLE_EXCERPT_CHARS, MAX_ARTICLE_TITLE_CHARS,
};
pub use crate::result::{
    ArticleCandidate, ContentBundle, Extraction, ExtractionOutcome, FailureOutcome, Heading,
    HeadingLevel, ImageItem, LinkItem, Metadata, PageInfo, SuccessOutcome,
};
