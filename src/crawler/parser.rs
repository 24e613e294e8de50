//! HTML parser for extracting page text and outbound links
//!
//! This module turns a fetched HTML body into:
//! - The visible text of the page, whitespace-collapsed
//! - Every `<a href>` target resolved to an absolute http(s) URL

use scraper::{Html, Node, Selector};
use url::Url;

/// Elements whose text content is never shown to a reader
const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Visible text, words separated by single spaces
    pub text: String,

    /// Absolute http(s) link targets, in document order, duplicates kept
    pub links: Vec<String>,
}

/// Parses HTML content and extracts text and links
///
/// # Link Extraction Rules
///
/// Every `<a href="...">` is resolved against `base_url`. Targets that fail to
/// resolve, or resolve to anything other than `http` or `https` (`mailto:`,
/// `javascript:`, `tel:`, `data:`, ...), are dropped. Resolved URLs are kept
/// verbatim, fragments included.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links
///
/// # Example
///
/// ```
/// use crawldex::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hello</p><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.text, "Hello Link");
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Collects visible text nodes and collapses runs of whitespace
fn extract_text(document: &Html) -> String {
    let mut words: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node
            .ancestors()
            .filter_map(|ancestor| ancestor.value().as_element())
            .any(|element| INVISIBLE_ELEMENTS.contains(&element.name()));
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}

/// Extracts all followable links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the href does not resolve or the result is not HTTP(S).
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    is_web_scheme(&absolute_url).then(|| absolute_url.to_string())
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// True for an absolute `http` or `https` URL
///
/// Relative references and every other scheme are rejected.
pub(crate) fn is_web_url(url: &str) -> bool {
    Url::parse(url).map(|u| is_web_scheme(&u)).unwrap_or(false)
}
