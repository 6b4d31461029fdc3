// ABOUTME: HTTP page loader: fetches a page for extraction with SSRF protection, size limits and a navigation timeout.
// ABOUTME: Decodes the body using the Content-Type charset or chardetng detection.

use std::collections::HashMap;
use std::net::{IpAddr, ToSocketAddrs};
use std::time::Duration;

use anyhow::anyhow;
use bytes::Bytes;
use ipnet::IpNet;
use once_cell::sync::Lazy;
use tracing::debug;
use url::Url;

use crate::error::LoadError;

/// Maximum accepted page size (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

const OP: &str = "Fetch";

/// Ranges a page load must not reach unless private networks are allowed.
static BLOCKED_NETS: Lazy<Vec<IpNet>> = Lazy::new(|| {
    [
        "0.0.0.0/8",
        "10.0.0.0/8",
        "127.0.0.0/8",
        "169.254.0.0/16",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "fc00::/7",
        "fe80::/10",
    ]
    .iter()
    .filter_map(|cidr| cidr.parse().ok())
    .collect()
});

/// Options for a single page load.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
    /// Budget for the whole load: DNS checks, request and body.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            headers: HashMap::new(),
            allow_private_networks: false,
            timeout: Duration::from_secs(30),
        }
    }
}

/// A page body as delivered by the server.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchedPage {
    /// Body decoded to UTF-8.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Returns true for private, loopback, link-local and unspecified addresses.
pub(crate) fn is_private_ip(addr: &IpAddr) -> bool {
    addr.is_loopback() || BLOCKED_NETS.iter().any(|net| net.contains(addr))
}

/// Decode body bytes to a String using the Content-Type charset, else detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(extract_charset)
        .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()));

    let encoding = declared.unwrap_or_else(|| {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(body, true);
        detector.guess(None, true)
    });

    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .to_lowercase()
        .split(';')
        .find_map(|part| {
            part.trim()
                .strip_prefix("charset=")
                .map(|cs| cs.trim_matches('"').trim_matches('\'').to_string())
        })
}

fn default_port(url: &Url) -> u16 {
    url.port_or_known_default().unwrap_or(80)
}

/// Rejects `target` if its host is, or resolves to, a blocked address.
async fn ensure_public(target: &Url, requested: &str) -> Result<(), LoadError> {
    let Some(host) = target.host_str() else {
        return Ok(());
    };
    let host = host.trim_start_matches('[').trim_end_matches(']');

    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_private_ip(&ip) {
            return Err(LoadError::ssrf(
                requested,
                OP,
                Some(anyhow!("private IP addresses are not allowed")),
            ));
        }
        return Ok(());
    }

    let addrs = tokio::net::lookup_host((host, default_port(target)))
        .await
        .map_err(|e| LoadError::fetch(requested, OP, Some(anyhow!("DNS lookup failed: {}", e))))?;

    for addr in addrs {
        if is_private_ip(&addr.ip()) {
            return Err(LoadError::ssrf(
                requested,
                OP,
                Some(anyhow!("{} resolves to a private address", host)),
            ));
        }
    }
    Ok(())
}

/// Redirect policy that refuses hops into blocked ranges.
///
/// Redirect policies are synchronous, so hostnames are resolved with the
/// blocking resolver here.
pub(crate) fn redirect_policy(allow_private: bool) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= 10 {
            return attempt.error("too many redirects");
        }
        if allow_private {
            return attempt.follow();
        }

        let next = attempt.url().clone();
        let Some(host) = next.host_str() else {
            return attempt.follow();
        };
        let host = host.trim_start_matches('[').trim_end_matches(']');

        if let Ok(ip) = host.parse::<IpAddr>() {
            if is_private_ip(&ip) {
                return attempt.error("redirect to private IP blocked");
            }
            return attempt.follow();
        }

        match (host, default_port(&next)).to_socket_addrs() {
            Ok(mut addrs) => {
                if addrs.any(|sa| is_private_ip(&sa.ip())) {
                    attempt.error("redirect to private IP blocked")
                } else {
                    attempt.follow()
                }
            }
            Err(_) => attempt.error("DNS lookup failed during redirect"),
        }
    })
}

fn request_error(url: &str, err: reqwest::Error, timeout: Duration) -> LoadError {
    if err.is_timeout() {
        timeout_error(url, timeout)
    } else {
        LoadError::fetch(url, OP, Some(anyhow!("request failed: {}", err)))
    }
}

fn timeout_error(url: &str, timeout: Duration) -> LoadError {
    LoadError::timeout(
        url,
        OP,
        Some(anyhow!("Timeout {}ms exceeded", timeout.as_millis())),
    )
}

/// Fetches `url` within `opts.timeout`.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchedPage, LoadError> {
    match tokio::time::timeout(opts.timeout, fetch_inner(client, url, opts)).await {
        Ok(result) => result,
        Err(_) => Err(timeout_error(url, opts.timeout)),
    }
}

async fn fetch_inner(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchedPage, LoadError> {
    if url.trim().is_empty() {
        return Err(LoadError::invalid_url(url, OP, None));
    }

    let target = Url::parse(url.trim())
        .map_err(|e| LoadError::invalid_url(url, OP, Some(anyhow!("invalid URL: {}", e))))?;

    if !matches!(target.scheme(), "http" | "https") {
        return Err(LoadError::invalid_url(
            url,
            OP,
            Some(anyhow!("scheme must be http or https")),
        ));
    }

    if !opts.allow_private_networks {
        ensure_public(&target, url).await?;
    }

    let mut request = client.get(target).timeout(opts.timeout);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| request_error(url, e, opts.timeout))?;

    if !opts.allow_private_networks {
        ensure_public(response.url(), url).await?;
    }

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::status(
            url,
            OP,
            Some(anyhow!("HTTP status {}", status.as_u16())),
        ));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_CONTENT_LENGTH as u64 {
            return Err(LoadError::fetch(url, OP, Some(anyhow!("content too large"))));
        }
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response
        .bytes()
        .await
        .map_err(|e| request_error(url, e, opts.timeout))?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(LoadError::fetch(url, OP, Some(anyhow!("content too large"))));
    }

    debug!(url, final_url = %final_url, bytes = body.len(), "page fetched");

    Ok(FetchedPage {
        status: status.as_u16(),
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}
