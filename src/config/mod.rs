//! Configuration module for Crawldex
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to the defaults,
//! which reproduce the classic 100/200/300 benchmark against a single seed.
//!
//! # Example
//!
//! ```no_run
//! use crawldex::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawldex.toml")).unwrap();
//! println!("Timed batches: {:?}", config.benchmark.batch_sizes);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BenchmarkConfig, Config, CrawlerConfig, IndexConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, MIN_WRITER_MEMORY_BYTES};
