// ABOUTME: The Client struct that loads pages over HTTP and runs the extraction engine on them.
// ABOUTME: Provides async scrape() for URLs and scrape_html() for documents the caller already holds.

use tracing::{debug, info, warn};

use crate::dom::HtmlSnapshot;
use crate::engine;
use crate::error::LoadError;
use crate::extractors::compiled::precompile_selectors;
use crate::extractors::DEFAULT_ARTICLE_SELECTORS;
use crate::options::{ClientBuilder, ExtractOptions, Options};
use crate::resource::{fetch, redirect_policy, FetchOptions, FetchedPage};
use crate::result::{Extraction, ExtractionOutcome};

/// Loads pages and extracts structured content from them.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .redirect(redirect_policy(opts.allow_private_networks))
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .unwrap_or_else(|err| {
                    warn!(error = %err, "falling back to default HTTP client");
                    reqwest::Client::new()
                })
        });

        precompile_selectors(DEFAULT_ARTICLE_SELECTORS.iter().copied());
        if let Some(custom) = opts.extract.custom_selectors() {
            precompile_selectors(custom);
        }

        Self { opts, http_client }
    }

    pub fn extract_options(&self) -> &ExtractOptions {
        &self.opts.extract
    }

    /// Fetch the page at `url` without extracting anything.
    pub async fn load(&self, url: &str) -> Result<FetchedPage, LoadError> {
        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
            timeout: self.opts.timeout,
        };
        fetch(&self.http_client, url, &fetch_opts).await
    }

    /// Load `url` and extract its content.
    ///
    /// Never fails: a load error is reported as a failure envelope carrying
    /// the requested URL.
    pub async fn scrape(&self, url: &str) -> ExtractionOutcome {
        info!(url, "scrape started");

        let extraction = self
            .load(url)
            .await
            .map(|page| self.extract_page(&page))
            .map_err(|err| {
                debug!(url, code = %err.code, error = %err, "load failed");
                err.message()
            });

        let outcome = engine::assemble(url, extraction);
        info!(url, success = outcome.is_success(), "scrape finished");
        outcome
    }

    /// Extract content from HTML the caller already has; `url` resolves relative links.
    pub fn scrape_html(&self, html: &str, url: &str) -> ExtractionOutcome {
        let doc = HtmlSnapshot::new(html, url);
        ExtractionOutcome::success(engine::extract(&doc, &self.opts.extract))
    }

    fn extract_page(&self, page: &FetchedPage) -> Extraction {
        let html = page.text();
        let doc = HtmlSnapshot::new(&html, &page.final_url);
        engine::extract(&doc, &self.opts.extract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    const LISTING: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Listing</title>
    <meta name="description" content="Latest stories">
    <meta property="og:title" content="Listing OG">
</head>
<body>
    <article>
        <h2><a href="/stories/first">First story headline</a></h2>
        <time datetime="2024-03-01">March 1</time>
        <p>Short teaser for the first story.</p>
    </article>
    <article>
        <h2><a href="/stories/second">Second story headline</a></h2>
    </article>
</body>
</html>"#;

    #[tokio::test]
    async fn scrape_extracts_from_fetched_page() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/news");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(LISTING);
        });

        let client = Client::builder().allow_private_networks(true).build();
        let outcome = client.scrape(&server.url("/news")).await;
        mock.assert();

        let ok = outcome.as_success().expect("scrape should succeed");
        assert_eq!(ok.page.title, "Listing");
        assert_eq!(ok.page.description, "Latest stories");
        assert_eq!(ok.page.url, server.url("/news"));
        assert_eq!(ok.content.articles.len(), 2);
        assert_eq!(ok.content.articles[0].link, server.url("/stories/first"));
        assert_eq!(ok.content.articles[0].date, "March 1");
        assert_eq!(ok.content.metadata.og_title, "Listing OG");
    }

    #[tokio::test]
    async fn scrape_reports_http_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404).body("gone");
        });

        let client = Client::builder().allow_private_networks(true).build();
        let url = server.url("/gone");
        let outcome = client.scrape(&url).await;

        let failure = outcome.as_failure().expect("404 should fail");
        assert_eq!(failure.error, "HTTP status 404");
        assert_eq!(failure.url, url);
    }

    #[tokio::test]
    async fn scrape_blocks_private_hosts_by_default() {
        let server = MockServer::start();
        let client = Client::builder().build();

        let outcome = client.scrape(&server.url("/")).await;
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn scrape_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body(LISTING);
        });

        let client = Client::builder()
            .allow_private_networks(true)
            .timeout(Duration::from_millis(250))
            .build();
        let outcome = client.scrape(&server.url("/slow")).await;

        let failure = outcome.as_failure().expect("should time out");
        assert_eq!(failure.error, "Timeout 250ms exceeded");
    }

    #[tokio::test]
    async fn scrape_rejects_malformed_url() {
        let client = Client::builder().build();
        let outcome = client.scrape("not a url").await;
        assert_eq!(outcome.as_failure().unwrap().url, "not a url");
    }

    #[tokio::test]
    async fn custom_selectors_apply_to_fetched_pages() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/custom");
            then.status(200).body(
                r#"<div class="teaser"><h3>Teaser headline here</h3></div>
                   <section><h2>Not a teaser</h2></section>"#,
            );
        });

        let client = Client::builder()
            .allow_private_networks(true)
            .article_selectors([".teaser"])
            .build();
        let outcome = client.scrape(&server.url("/custom")).await;

        let ok = outcome.as_success().expect("scrape should succeed");
        let titles: Vec<_> = ok.content.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Teaser headline here"]);
    }

    #[test]
    fn scrape_html_uses_given_url() {
        let client = Client::builder().build();
        let outcome = client.scrape_html(LISTING, "https://news.example.com/front");

        let ok = outcome.as_success().expect("success");
        assert_eq!(ok.page.url, "https://news.example.com/front");
        assert_eq!(
            ok.content.articles[1].link,
            "https://news.example.com/stories/second"
        );
    }

    #[test]
    fn scrape_html_on_empty_document_succeeds() {
        let client = Client::builder().build();
        let outcome = client.scrape_html("", "https://example.com/");

        let ok = outcome.as_success().expect("success");
        assert!(ok.content.articles.is_empty());
        assert_eq!(ok.page.title, "");
    }
}
