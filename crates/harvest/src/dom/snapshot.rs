// ABOUTME: scraper-backed DocumentSnapshot: parses HTML once and answers selector queries against it.
// ABOUTME: Implements innerText-like rendering and href-style URL resolution honoring <base href>.

use ego_tree::iter::Edge;
use scraper::{ElementRef, Html, Node};
use url::Url;

use crate::dom::{normalize_whitespace, DocumentSnapshot, ElementQuery};
use crate::extractors::compiled::get_or_compile;

/// Elements whose text never renders.
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that break a line when rendered; their text must not glue onto neighbours.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// A parsed HTML page.
///
/// Construction never fails: malformed markup is repaired by the HTML5
/// parser, and an unparseable page URL only disables relative URL resolution.
pub struct HtmlSnapshot {
    html: Html,
    url: String,
    base: Option<Url>,
}

impl HtmlSnapshot {
    /// Parses `html` as a full document loaded from `url`.
    pub fn new(html: &str, url: &str) -> Self {
        let html = Html::parse_document(html);
        let page = Url::parse(url.trim()).ok();
        let base = document_base(&html, page.as_ref()).or(page);

        Self {
            html,
            url: url.to_string(),
            base,
        }
    }

    /// The underlying parsed document.
    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Reads `<base href>`, resolved against the page URL.
fn document_base(html: &Html, page: Option<&Url>) -> Option<Url> {
    let selector = get_or_compile("base[href]")?;
    let href = html.select(&selector).next()?.value().attr("href")?.trim();
    match page {
        Some(page) => page.join(href).ok(),
        None => Url::parse(href).ok(),
    }
}

impl DocumentSnapshot for HtmlSnapshot {
    type Element<'a> = ElementRef<'a>;

    fn url(&self) -> &str {
        &self.url
    }

    fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    fn resolve_url(&self, reference: &str) -> Option<String> {
        let reference = reference.trim();

        let resolved = match &self.base {
            Some(base) => base
                .join(reference)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| reference.to_string()),
            None if reference.is_empty() => self.url.trim().to_string(),
            None => reference.to_string(),
        };
        Some(resolved).filter(|url| !url.is_empty())
    }
}

impl<'a> ElementQuery for ElementRef<'a> {
    fn query_all(self, selector: &str) -> Vec<Self> {
        let Some(compiled) = get_or_compile(selector) else {
            return Vec::new();
        };
        let whole_document = is_document_element(self);
        self.select(&compiled)
            .filter(|el| whole_document || *el != self)
            .collect()
    }

    fn query_one(self, selector: &str) -> Option<Self> {
        let compiled = get_or_compile(selector)?;
        let whole_document = is_document_element(self);
        self.select(&compiled)
            .find(|el| whole_document || *el != self)
    }

    fn closest(self, selector: &str) -> Option<Self> {
        let compiled = get_or_compile(selector)?;
        std::iter::once(self)
            .chain(self.ancestors().filter_map(ElementRef::wrap))
            .find(|el| compiled.matches(el))
    }

    fn inner_text(self) -> String {
        rendered_text(self)
    }

    fn attribute(self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn tag_name(self) -> String {
        self.value().name().to_ascii_uppercase()
    }
}

/// True for `<html>`, whose queries stand in for queries on the document itself.
fn is_document_element(el: ElementRef<'_>) -> bool {
    el.parent().is_some_and(|parent| parent.value().is_document())
}

/// Approximates `innerText`: skips non-rendered subtrees and separates block boxes.
fn rendered_text(scope: ElementRef<'_>) -> String {
    let mut raw = String::new();
    let mut hidden_depth = 0usize;

    for edge in scope.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(el) => {
                    let name = el.name();
                    if HIDDEN_TAGS.contains(&name) {
                        hidden_depth += 1;
                    } else if BLOCK_TAGS.contains(&name) {
                        raw.push(' ');
                    }
                }
                Node::Text(text) if hidden_depth == 0 => raw.push_str(text),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(el) = node.value() {
                    let name = el.name();
                    if HIDDEN_TAGS.contains(&name) {
                        hidden_depth = hidden_depth.saturating_sub(1);
                    } else if BLOCK_TAGS.contains(&name) {
                        raw.push(' ');
                    }
                }
            }
        }
    }

    normalize_whitespace(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
        <html>
        <head><title>  Snapshot   Test </title></head>
        <body>
            <div class="card" id="outer">
                <a href="/posts/1"><div class="card inner"><h2>Nested</h2></div></a>
            </div>
            <p>Hello<script>var x = 1;</script> <b>world</b><style>p{}</style></p>
            <p>line one<br>line two</p>
            <ul><li>alpha</li><li>beta</li></ul>
        </body>
        </html>
    "#;

    fn snapshot() -> HtmlSnapshot {
        HtmlSnapshot::new(PAGE, "https://example.com/blog/index.html")
    }

    #[test]
    fn query_all_excludes_scope_element() {
        let snap = snapshot();
        let outer = snap.root().query_one("#outer").unwrap();
        let cards = outer.query_all(".card");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].attribute("class").as_deref(), Some("card inner"));
    }

    #[test]
    fn closest_includes_self_and_ancestors() {
        let snap = snapshot();
        let inner = snap.root().query_one(".inner").unwrap();
        let anchor = inner.closest("a").unwrap();
        assert_eq!(anchor.attribute("href").as_deref(), Some("/posts/1"));
        assert_eq!(inner.closest(".card").unwrap(), inner);
        assert!(inner.closest("article").is_none());
    }

    #[test]
    fn inner_text_skips_scripts_and_styles() {
        let snap = snapshot();
        let p = snap.root().query_one("p").unwrap();
        assert_eq!(p.inner_text(), "Hello world");
    }

    #[test]
    fn inner_text_separates_block_boundaries() {
        let snap = snapshot();
        let paragraphs = snap.root().query_all("p");
        assert_eq!(paragraphs[1].inner_text(), "line one line two");
        let list = snap.root().query_one("ul").unwrap();
        assert_eq!(list.inner_text(), "alpha beta");
    }

    #[test]
    fn tag_name_is_upper_case() {
        let snap = snapshot();
        assert_eq!(snap.root().query_one("h2").unwrap().tag_name(), "H2");
    }

    #[test]
    fn invalid_selector_matches_nothing() {
        let snap = snapshot();
        assert!(snap.root().query_all("[[[invalid").is_empty());
        assert!(snap.root().query_one("[[[invalid").is_none());
    }

    #[test]
    fn resolves_relative_against_page_url() {
        let snap = snapshot();
        assert_eq!(
            snap.resolve_url("/posts/1").as_deref(),
            Some("https://example.com/posts/1")
        );
        assert_eq!(
            snap.resolve_url("next.html").as_deref(),
            Some("https://example.com/blog/next.html")
        );
    }

    #[test]
    fn empty_reference_resolves_to_document_url() {
        let snap = HtmlSnapshot::new("<html><body></body></html>", "https://example.com/page#top");
        assert_eq!(snap.resolve_url("").as_deref(), Some("https://example.com/page"));
        assert_eq!(snap.resolve_url("   ").as_deref(), Some("https://example.com/page"));

        let based = HtmlSnapshot::new(
            r#"<html><head><base href="/docs/"></head><body></body></html>"#,
            "https://example.com/page",
        );
        assert_eq!(based.resolve_url("").as_deref(), Some("https://example.com/docs/"));

        let unparsed = HtmlSnapshot::new("<html><body></body></html>", "");
        assert_eq!(unparsed.resolve_url(""), None);
    }

    #[test]
    fn root_queries_can_match_the_document_element() {
        let snap = snapshot();
        let root = snap.root();
        assert_eq!(root.query_all("html").len(), 1);
        assert_eq!(root.query_one(":root").map(|el| el.tag_name()).as_deref(), Some("HTML"));

        let body = root.query_one("body").unwrap();
        assert!(body.query_one("body").is_none());
    }

    #[test]
    fn inner_text_keeps_non_breaking_spaces() {
        let snap = HtmlSnapshot::new("<html><body><h2> A&nbsp;&nbsp;&nbsp;B </h2></body></html>", "https://example.com/");
        let heading = snap.root().query_one("h2").unwrap();
        assert_eq!(heading.inner_text(), "A\u{a0}\u{a0}\u{a0}B");
    }

    #[test]
    fn resolves_against_base_href() {
        let snap = HtmlSnapshot::new(
            r#"<html><head><base href="https://cdn.example.org/assets/"></head><body></body></html>"#,
            "https://example.com/page",
        );
        assert_eq!(
            snap.resolve_url("img/a.png").as_deref(),
            Some("https://cdn.example.org/assets/img/a.png")
        );
    }

    #[test]
    fn unparseable_page_url_keeps_raw_reference() {
        let snap = HtmlSnapshot::new("<html><body></body></html>", "not a url");
        assert_eq!(snap.resolve_url("/a").as_deref(), Some("/a"));
        assert_eq!(
            snap.resolve_url("https://x.com/a").as_deref(),
            Some("https://x.com/a")
        );
        assert_eq!(snap.url(), "not a url");
    }
}
