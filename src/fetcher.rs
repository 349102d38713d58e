//! Page fetching and link discovery
//!
//! `HttpFetcher` performs the raw HTTP GET behind the `Fetch` trait: it
//! validates the URL, sends a browser-like User-Agent, follows redirects,
//! and accepts only 200 responses whose Content-Type is HTML or JSON.
//! Everything else surfaces as a `FetchError`; the crawl loop treats any
//! error as terminal for that URL.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

/// URL schemes the fetcher will attempt.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("unsupported content type '{0}'")]
    ContentType(String),
}

/// The fetch collaborator consumed by the crawl loop.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch a page body. Any error means the URL is abandoned; there is no
    /// retry.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP implementation of `Fetch` backed by a shared reqwest client.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the client once from the fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }

    /// Check that a URL is well formed before any request goes out.
    fn validate(url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }
        Ok(parsed)
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Self::validate(url)?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if status != 200 {
            return Err(FetchError::Status(status));
        }
        if !content_type.contains("text/html") && !content_type.contains("application/json") {
            return Err(FetchError::ContentType(content_type));
        }

        Ok(response.text().await?)
    }
}

/// Extract absolute link targets from a page body.
///
/// Hrefs are taken from anchor elements, resolved against `base`, and
/// deduplicated while keeping document order. Protocol-relative hrefs
/// (`//host/path`) default to `http://`. Anchors, mail/tel/javascript
/// pseudo-links, and targets outside the allowed schemes are skipped.
pub fn extract_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_href(base, href) else {
            continue;
        };
        if ALLOWED_SCHEMES.contains(&resolved.scheme()) && seen.insert(resolved.as_str().to_string())
        {
            links.push(resolved.into());
        }
    }

    links
}

fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
    {
        return None;
    }

    // Scheme-less host references default to plain http.
    if let Some(rest) = href.strip_prefix("//") {
        return Url::parse(&format!("http://{}", rest)).ok();
    }

    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(href).ok(),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_bad_scheme() {
        assert!(matches!(
            HttpFetcher::validate("file:///etc/passwd"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn validate_rejects_unparseable_url() {
        assert!(matches!(
            HttpFetcher::validate("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn validate_accepts_http_https_ftp() {
        assert!(HttpFetcher::validate("http://example.com/").is_ok());
        assert!(HttpFetcher::validate("https://example.com/page").is_ok());
        assert!(HttpFetcher::validate("ftp://example.com/file").is_ok());
    }

    #[test]
    fn extract_links_resolves_relative_hrefs() {
        let base = Url::parse("https://example.com/dir/page").unwrap();
        let html = r#"<a href="/about">About</a> <a href="other">Other</a>"#;

        let links = extract_links(html, &base);
        assert_eq!(
            links,
            vec![
                "https://example.com/about".to_string(),
                "https://example.com/dir/other".to_string(),
            ]
        );
    }

    #[test]
    fn extract_links_defaults_protocol_relative_to_http() {
        let base = Url::parse("https://example.com/").unwrap();
        let html = r#"<a href="//other.com/page">x</a>"#;

        let links = extract_links(html, &base);
        assert_eq!(links, vec!["http://other.com/page".to_string()]);
    }

    #[test]
    fn extract_links_deduplicates_in_document_order() {
        let base = Url::parse("https://example.com/").unwrap();
        let html = r#"
            <a href="https://example.com/b">b</a>
            <a href="https://example.com/a">a</a>
            <a href="https://example.com/b">b again</a>
        "#;

        let links = extract_links(html, &base);
        assert_eq!(
            links,
            vec![
                "https://example.com/b".to_string(),
                "https://example.com/a".to_string(),
            ]
        );
    }

    #[test]
    fn extract_links_skips_pseudo_links() {
        let base = Url::parse("https://example.com/").unwrap();
        let html = r##"
            <a href="#section">anchor</a>
            <a href="mailto:a@b.c">mail</a>
            <a href="tel:+123">tel</a>
            <a href="javascript:void(0)">js</a>
            <a href="https://example.com/real">real</a>
        "##;

        let links = extract_links(html, &base);
        assert_eq!(links, vec!["https://example.com/real".to_string()]);
    }
}
