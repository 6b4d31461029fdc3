// ABOUTME: Error types for the page loader: ErrorCode categories and the LoadError struct.
// ABOUTME: Only loader failures become errors; the extraction engine itself never fails.

use std::fmt;

/// Categories of page-load failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Ssrf,
    Status,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Ssrf => "SSRF blocked",
            ErrorCode::Status => "bad HTTP status",
        };
        write!(f, "{}", s)
    }
}

/// A failure to load the page that extraction would have run on.
#[derive(Debug, thiserror::Error)]
pub struct LoadError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "harvest: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl LoadError {
    fn new(code: ErrorCode, url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    pub fn invalid_url(url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    pub fn fetch(url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::Fetch, url, op, source)
    }

    pub fn timeout(url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::Timeout, url, op, source)
    }

    pub fn ssrf(url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::Ssrf, url, op, source)
    }

    pub fn status(url: impl Into<String>, op: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self::new(ErrorCode::Status, url, op, source)
    }

    /// Human-readable cause for the failure envelope, without the op/url prefix.
    pub fn message(&self) -> String {
        match self.source {
            Some(ref src) => src.to_string(),
            None => self.code.to_string(),
        }
    }

    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    pub fn is_ssrf(&self) -> bool {
        self.code == ErrorCode::Ssrf
    }

    pub fn is_status(&self) -> bool {
        self.code == ErrorCode::Status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_op_url_code_and_source() {
        let err = LoadError::fetch(
            "https://example.com",
            "Fetch",
            Some(anyhow::anyhow!("connection reset")),
        );
        assert_eq!(
            err.to_string(),
            "harvest: Fetch https://example.com: fetch error: connection reset"
        );
    }

    #[test]
    fn message_prefers_source() {
        let err = LoadError::timeout(
            "https://example.com",
            "Fetch",
            Some(anyhow::anyhow!("Timeout 30000ms exceeded")),
        );
        assert_eq!(err.message(), "Timeout 30000ms exceeded");
        assert!(err.is_timeout());

        let bare = LoadError::invalid_url("", "Scrape", None);
        assert_eq!(bare.message(), "invalid URL");
        assert!(bare.is_invalid_url());
    }

    #[test]
    fn helpers_match_codes() {
        assert!(LoadError::ssrf("u", "Fetch", None).is_ssrf());
        assert!(LoadError::status("u", "Fetch", None).is_status());
        assert!(LoadError::fetch("u", "Fetch", None).is_fetch());
        assert!(!LoadError::fetch("u", "Fetch", None).is_timeout());
    }
}
