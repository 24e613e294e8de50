//! Crawler module for page fetching and batch crawling
//!
//! This module contains the core crawling logic, including:
//! - The frontier queue and visited set
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - HTML text and link extraction
//! - The batch driver that feeds fetched pages into the index

mod driver;
mod fetcher;
mod frontier;
mod parser;

pub use driver::{BatchResult, CrawlSession};
pub use fetcher::{
    build_http_client, FetchError, FetchFailure, FetchedPage, HttpFetcher, PageFetcher,
};
pub use frontier::Frontier;
pub use parser::{parse_html, ParsedPage};

use crate::config::Config;
use crate::index::DocumentIndex;
use crate::CrawldexError;

/// Builds an HTTP-backed session from configuration
///
/// The index is created empty in memory and the frontier is seeded with every
/// configured seed, in order.
///
/// # Returns
///
/// * `Ok(CrawlSession)` - Ready to crawl
/// * `Err(CrawldexError)` - The HTTP client could not be built
pub fn open_session(config: &Config) -> Result<CrawlSession<HttpFetcher>, CrawldexError> {
    let fetcher = HttpFetcher::from_config(&config.crawler, &config.user_agent)?;
    let index = DocumentIndex::in_memory(config.index.writer_memory_bytes);
    Ok(CrawlSession::with_seeds(
        fetcher,
        index,
        config.crawler.seeds.iter().cloned(),
    ))
}
