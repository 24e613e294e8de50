use crate::config::types::{BenchmarkConfig, Config, CrawlerConfig, IndexConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Smallest per-thread writer budget the index accepts
pub const MIN_WRITER_MEMORY_BYTES: usize = 15_000_000;

const MAX_REDIRECTS_LIMIT: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_index_config(&config.index)?;
    validate_benchmark_config(&config.benchmark)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &config.seeds {
        validate_seed(seed)?;
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS_LIMIT, config.max_redirects
        )));
    }

    Ok(())
}

/// Seeds enter the frontier unchecked, so they must already be absolute web URLs
fn validate_seed(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https",
            seed
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates index configuration
fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    if config.writer_memory_bytes < MIN_WRITER_MEMORY_BYTES {
        return Err(ConfigError::Validation(format!(
            "writer_memory_bytes must be >= {}, got {}",
            MIN_WRITER_MEMORY_BYTES, config.writer_memory_bytes
        )));
    }

    if config.hits_per_page < 1 {
        return Err(ConfigError::Validation(
            "hits_per_page must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the benchmark plan
fn validate_benchmark_config(config: &BenchmarkConfig) -> Result<(), ConfigError> {
    if config.batch_sizes.is_empty() {
        return Err(ConfigError::Validation(
            "at least one batch size is required".to_string(),
        ));
    }

    if let Some(size) = config
        .warmup_batches
        .iter()
        .chain(&config.batch_sizes)
        .find(|size| **size == 0)
    {
        return Err(ConfigError::Validation(format!(
            "batch sizes must be >= 1, got {}",
            size
        )));
    }

    Ok(())
}
