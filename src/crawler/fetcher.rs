//! HTTP fetcher implementation
//!
//! This module handles all page retrieval for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests that follow redirects
//! - Content-Type screening
//! - Handing the body to the parser for text and link extraction
//!
//! Every failure collapses into one [`FetchError`]; the crawler drops the URL and
//! moves on, so the reason is only kept for diagnostics.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::parser::parse_html;
use reqwest::{redirect::Policy, Client};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A page that was fetched and parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Visible text of the page
    pub content: String,

    /// Absolute http(s) outbound links
    pub links: Vec<String>,
}

/// Why a fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request timed out
    Timeout,

    /// The connection could not be established
    Connect,

    /// The server answered with a non-success status
    Status(u16),

    /// The response is not an HTML or text document
    UnsupportedContent(String),

    /// Any other request or body-read error
    Request(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timeout"),
            Self::Connect => write!(f, "connection failed"),
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::UnsupportedContent(content_type) => {
                write!(f, "unsupported content type '{}'", content_type)
            }
            Self::Request(message) => write!(f, "{}", message),
        }
    }
}

/// A URL could not be turned into a page; carries no partial content
#[derive(Debug, Clone, Error)]
#[error("Fetch failed for {url}: {reason}")]
pub struct FetchError {
    pub url: String,
    pub reason: FetchFailure,
}

impl FetchError {
    pub fn new(url: impl Into<String>, reason: FetchFailure) -> Self {
        Self {
            url: url.into(),
            reason,
        }
    }

    fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let reason = if error.is_timeout() {
            FetchFailure::Timeout
        } else if error.is_connect() {
            FetchFailure::Connect
        } else {
            FetchFailure::Request(error.to_string())
        };
        Self::new(url, reason)
    }
}

/// Source of pages for the crawler
///
/// Implementations resolve every outbound link to an absolute http(s) URL before
/// returning it.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Retrieves one URL
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `crawler` - Timeouts and redirect limit
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    crawler: &CrawlerConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .redirect(Policy::limited(crawler.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP and parses them as HTML
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from configuration
    pub fn from_config(
        crawler: &CrawlerConfig,
        user_agent: &UserAgentConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(crawler, user_agent)?))
    }
}

impl PageFetcher for HttpFetcher {
    /// # Request Flow
    ///
    /// 1. GET the URL, following redirects up to the configured limit
    /// 2. Non-2xx status → `Status`
    /// 3. Content-Type that is not HTML, XML or text → `UnsupportedContent`
    /// 4. Parse the body; links resolve against the final (post-redirect) URL
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(url, FetchFailure::Status(status.as_u16())));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !is_supported_content_type(&content_type) {
            return Err(FetchError::new(
                url,
                FetchFailure::UnsupportedContent(content_type),
            ));
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let parsed = parse_html(&body, &final_url);
        Ok(FetchedPage {
            content: parsed.text,
            links: parsed.links,
        })
    }
}

/// Accepts HTML, XML and plain text; a missing Content-Type is given the benefit of
/// the doubt
fn is_supported_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.is_empty()
        || mime.starts_with("text/")
        || mime == "application/xml"
        || mime.ends_with("+xml")
}
