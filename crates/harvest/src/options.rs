// ABOUTME: Configuration: extraction thresholds (Limits, ExtractOptions) and loader settings (Options, ClientBuilder).
// ABOUTME: Everything is passed explicitly per call; ExtractOptions deserializes from JSON with per-field defaults.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::Client;

/// Desktop Chrome user agent; many sites serve bots a stripped page.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Most articles a result may carry.
pub const MAX_ARTICLES: usize = 20;
/// Longest stored article title, in chars.
pub const MAX_ARTICLE_TITLE_CHARS: usize = 200;
/// Longest stored article excerpt, in chars.
pub const MAX_ARTICLE_EXCERPT_CHARS: usize = 500;

/// An exclusive length window: a length `n` is admitted when `above < n < below`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRange {
    pub above: usize,
    pub below: usize,
}

impl LengthRange {
    pub const fn new(above: usize, below: usize) -> Self {
        Self { above, below }
    }

    /// Returns true if `len` lies strictly inside the window.
    pub fn admits(&self, len: usize) -> bool {
        len > self.above && len < self.below
    }
}

/// Length filters and truncation caps applied by the strategies. Lengths count chars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub article_title: LengthRange,
    pub article_title_max_chars: usize,
    pub article_excerpt_max_chars: usize,
    pub heading_text: LengthRange,
    pub paragraph_text: LengthRange,
    pub paragraph_max_chars: usize,
    pub link_text: LengthRange,
    pub link_text_max_chars: usize,
    pub image_alt_max_chars: usize,
    pub max_articles: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            article_title: LengthRange::new(3, 300),
            article_title_max_chars: MAX_ARTICLE_TITLE_CHARS,
            article_excerpt_max_chars: MAX_ARTICLE_EXCERPT_CHARS,
            heading_text: LengthRange::new(3, 200),
            paragraph_text: LengthRange::new(50, 1000),
            paragraph_max_chars: 500,
            link_text: LengthRange::new(3, 150),
            link_text_max_chars: 100,
            image_alt_max_chars: 100,
            max_articles: MAX_ARTICLES,
        }
    }
}

impl Limits {
    /// These limits with the article caps held at or below their ceilings.
    ///
    /// Configuration may tighten the article count, title and excerpt caps
    /// but never loosen them.
    pub fn bounded(&self) -> Limits {
        Limits {
            max_articles: self.max_articles.min(MAX_ARTICLES),
            article_title_max_chars: self.article_title_max_chars.min(MAX_ARTICLE_TITLE_CHARS),
            article_excerpt_max_chars: self
                .article_excerpt_max_chars
                .min(MAX_ARTICLE_EXCERPT_CHARS),
            ..self.clone()
        }
    }
}

/// Per-call extraction settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Article container selectors, tried in order. `None` or empty uses the built-in list.
    pub article_selectors: Option<Vec<String>>,
    pub limits: Limits,
}

impl ExtractOptions {
    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The caller's selector list, if it names at least one selector.
    pub fn custom_selectors(&self) -> Option<&[String]> {
        self.article_selectors
            .as_deref()
            .filter(|selectors| !selectors.is_empty())
    }
}

/// Configuration for the page-loading [`Client`].
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub allow_private_networks: bool,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
    pub extract: ExtractOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_private_networks: false,
            headers: HashMap::new(),
            http_client: None,
            extract: ExtractOptions::default(),
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the navigation timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Allow or disallow requests to private networks.
    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.opts.allow_private_networks = allow;
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Replace the extraction settings wholesale.
    pub fn extract_options(mut self, extract: ExtractOptions) -> Self {
        self.opts.extract = extract;
        self
    }

    /// Override the article container selectors.
    pub fn article_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opts.extract.article_selectors = Some(selectors.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the length thresholds.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.opts.extract.limits = limits;
        self
    }

    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn length_range_is_exclusive_on_both_ends() {
        let range = LengthRange::new(50, 1000);
        assert!(!range.admits(50));
        assert!(range.admits(51));
        assert!(range.admits(999));
        assert!(!range.admits(1000));
    }

    #[test]
    fn default_title_floor_is_four_chars() {
        let limits = Limits::default();
        assert!(!limits.article_title.admits(3));
        assert!(limits.article_title.admits(4));
        assert!(!limits.article_title.admits(300));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let opts = ExtractOptions::from_json(
            r#"{"article_selectors": [".story"], "limits": {"link_text": {"above": 3, "below": 100}}}"#,
        )
        .unwrap();
        assert_eq!(opts.custom_selectors(), Some(&[".story".to_string()][..]));
        assert_eq!(opts.limits.link_text, LengthRange::new(3, 100));
        assert_eq!(opts.limits.max_articles, 20);
        assert_eq!(opts.limits.paragraph_max_chars, 500);
    }

    #[test]
    fn article_caps_cannot_be_raised() {
        let opts = ExtractOptions::from_json(
            r#"{"limits": {"max_articles": 50, "article_title_max_chars": 1000, "article_excerpt_max_chars": 5000, "paragraph_max_chars": 800}}"#,
        )
        .unwrap();
        let bounded = opts.limits.bounded();
        assert_eq!(bounded.max_articles, 20);
        assert_eq!(bounded.article_title_max_chars, 200);
        assert_eq!(bounded.article_excerpt_max_chars, 500);
        assert_eq!(bounded.paragraph_max_chars, 800);

        let tighter = Limits {
            max_articles: 5,
            article_title_max_chars: 80,
            ..Default::default()
        };
        assert_eq!(tighter.bounded(), tighter);
    }

    #[test]
    fn empty_selector_list_means_defaults() {
        let opts = ExtractOptions {
            article_selectors: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(opts.custom_selectors(), None);
        assert_eq!(ExtractOptions::default().custom_selectors(), None);
    }

    #[test]
    fn builder_sets_extract_options() {
        let builder = ClientBuilder::new()
            .article_selectors([".story", ".teaser"])
            .timeout(Duration::from_millis(250));
        assert_eq!(
            builder.opts.extract.article_selectors,
            Some(vec![".story".to_string(), ".teaser".to_string()])
        );
        assert_eq!(builder.opts.timeout, Duration::from_millis(250));
        assert_eq!(builder.opts.user_agent, DEFAULT_USER_AGENT);
    }
}
