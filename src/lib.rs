//! Crawldex: a crawl-and-index throughput bench
//!
//! This crate crawls a seed set of web pages breadth-first, feeds their text into an
//! in-memory full-text index, and measures how indexing and querying behave as the
//! index grows over repeated batches.

pub mod bench;
pub mod config;
pub mod crawler;
pub mod index;

use thiserror::Error;

/// Main error type for Crawldex operations
#[derive(Debug, Error)]
pub enum CrawldexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Index error: {0}")]
    Index(#[from] index::IndexError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Crawldex operations
pub type Result<T> = std::result::Result<T, CrawldexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use bench::{run_benchmark, BenchmarkPlan, BenchmarkReport, BenchmarkStep};
pub use config::Config;
pub use crawler::{BatchResult, CrawlSession, Frontier, HttpFetcher, PageFetcher};
pub use index::{Document, DocumentIndex, QueryOutcome, QueryReport};
