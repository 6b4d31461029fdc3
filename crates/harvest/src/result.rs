// ABOUTME: Extraction data model (PageInfo, ArticleCandidate, ContentBundle, ...) and the ExtractionOutcome envelope.
// ABOUTME: The envelope serializes as {success: true, page, content, scrapedAt} or {success: false, error, url, scrapedAt}.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Page-level facts read once per snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// A tentative article teaser found inside a container element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCandidate {
    pub title: String,
    pub link: String,
    pub date: String,
    pub excerpt: String,
}

impl ArticleCandidate {
    /// Identity used for deduplication: the link, or the title when there is no link.
    pub fn dedup_key(&self) -> &str {
        if self.link.is_empty() {
            &self.title
        } else {
            &self.link
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Maps an upper-case tag name to a level.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "H1" => Some(HeadingLevel::H1),
            "H2" => Some(HeadingLevel::H2),
            "H3" => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    pub src: String,
    pub alt: String,
}

/// Social and authorship metadata; every key defaults to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub author: String,
    pub published_date: String,
}

/// Everything the strategies found, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub articles: Vec<ArticleCandidate>,
    pub headings: Vec<Heading>,
    pub paragraphs: Vec<String>,
    pub links: Vec<LinkItem>,
    pub images: Vec<ImageItem>,
    pub metadata: Metadata,
}

/// The engine's output for one snapshot, before it is stamped into an envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub page: PageInfo,
    pub content: ContentBundle,
    /// Encoded rendering of the page, when the loader produced one.
    pub screenshot: Option<String>,
}

impl Extraction {
    /// Attaches an opaque encoded screenshot supplied by the page loader.
    pub fn with_screenshot(mut self, encoded: impl Into<String>) -> Self {
        self.screenshot = Some(encoded.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessOutcome {
    pub page: PageInfo,
    pub content: ContentBundle,
    pub screenshot: Option<String>,
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureOutcome {
    pub error: String,
    pub url: String,
    pub scraped_at: DateTime<Utc>,
}

/// The single value handed back to callers: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Success(SuccessOutcome),
    Failure(FailureOutcome),
}

impl ExtractionOutcome {
    /// Stamps a finished extraction with the current time.
    pub fn success(extraction: Extraction) -> Self {
        ExtractionOutcome::Success(SuccessOutcome {
            page: extraction.page,
            content: extraction.content,
            screenshot: extraction.screenshot,
            scraped_at: Utc::now(),
        })
    }

    /// Records a load failure for `url` with the current time.
    pub fn failure(error: impl Into<String>, url: impl Into<String>) -> Self {
        ExtractionOutcome::Failure(FailureOutcome {
            error: error.into(),
            url: url.into(),
            scraped_at: Utc::now(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionOutcome::Success(_))
    }

    pub fn scraped_at(&self) -> DateTime<Utc> {
        match self {
            ExtractionOutcome::Success(ok) => ok.scraped_at,
            ExtractionOutcome::Failure(err) => err.scraped_at,
        }
    }

    pub fn as_success(&self) -> Option<&SuccessOutcome> {
        match self {
            ExtractionOutcome::Success(ok) => Some(ok),
            ExtractionOutcome::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&FailureOutcome> {
        match self {
            ExtractionOutcome::Success(_) => None,
            ExtractionOutcome::Failure(err) => Some(err),
        }
    }
}

/// ISO-8601 in the `Date.prototype.toISOString` shape, e.g. `2024-05-01T09:30:00.123Z`.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Serialize for ExtractionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ExtractionOutcome::Success(ok) => {
                let fields = if ok.screenshot.is_some() { 5 } else { 4 };
                let mut state = serializer.serialize_struct("ExtractionOutcome", fields)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("page", &ok.page)?;
                state.serialize_field("content", &ok.content)?;
                if let Some(ref shot) = ok.screenshot {
                    state.serialize_field("screenshot", shot)?;
                }
                state.serialize_field("scrapedAt", &format_timestamp(&ok.scraped_at))?;
                state.end()
            }
            ExtractionOutcome::Failure(err) => {
                let mut state = serializer.serialize_struct("ExtractionOutcome", 4)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &err.error)?;
                state.serialize_field("url", &err.url)?;
                state.serialize_field("scrapedAt", &format_timestamp(&err.scraped_at))?;
                state.end()
            }
        }
    }
}
