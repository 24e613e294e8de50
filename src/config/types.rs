use serde::Deserialize;

/// Main configuration structure for Crawldex
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URLs the frontier is seeded with
    pub seeds: Vec<String>,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Redirect hops followed before a fetch fails
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seeds: vec!["https://cc.gatech.edu".to_string()],
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "crawldex".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Index and query configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Memory budget handed to each batch writer (bytes)
    #[serde(rename = "writer-memory-bytes")]
    pub writer_memory_bytes: usize,

    /// Size of the ranked page retrieved per query
    #[serde(rename = "hits-per-page")]
    pub hits_per_page: usize,

    /// Whether to resolve and report the ranked URL list for each query
    #[serde(rename = "show-urls")]
    pub show_urls: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            writer_memory_bytes: 50_000_000,
            hits_per_page: 1000,
            show_urls: false,
        }
    }
}

/// Benchmark plan configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Batches run (and queried) before the timed batches
    #[serde(rename = "warmup-batches")]
    pub warmup_batches: Vec<usize>,

    /// Timed batch sizes, run in order
    #[serde(rename = "batch-sizes")]
    pub batch_sizes: Vec<usize>,

    /// Queries evaluated after every batch
    pub queries: Vec<String>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            warmup_batches: vec![100, 1],
            batch_sizes: vec![100, 200, 300],
            queries: ["georgia", "page", "new", "Senior", "graduate"]
                .iter()
                .map(|q| q.to_string())
                .collect(),
        }
    }
}
