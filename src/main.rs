//! Crawldex main entry point
//!
//! This is the command-line interface for the Crawldex crawl-and-index bench.

use clap::Parser;
use crawldex::bench::{print_report, print_step};
use crawldex::config::{load_config_with_hash, validate, Config};
use crawldex::crawler::open_session;
use crawldex::{run_benchmark, BenchmarkPlan};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crawldex: crawl, index, query, repeat
///
/// Crawldex crawls a seed set breadth-first in batches, indexes the visible text of
/// every page in memory, and after each batch times how many hits a fixed list of
/// queries returns against the growing index.
#[derive(Parser, Debug)]
#[command(name = "crawldex")]
#[command(version)]
#[command(about = "A crawl-and-index throughput bench", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Seed URL; replaces the configured seeds (repeatable)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Query to run after every batch; replaces the configured queries (repeatable)
    #[arg(long = "query", value_name = "QUERY")]
    queries: Vec<String>,

    /// Timed batch size; replaces the configured sizes (repeatable)
    #[arg(long = "batch-size", value_name = "N")]
    batch_sizes: Vec<usize>,

    /// Skip the warm-up batches
    #[arg(long)]
    no_warmup: bool,

    /// Print the ranked URLs of every hit
    #[arg(long)]
    show_urls: bool,

    /// Validate config and show what would run without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, &cli);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_benchmark(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawldex=info,warn"),
            1 => EnvFilter::new("crawldex=debug,info"),
            2 => EnvFilter::new("crawldex=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Command-line flags take precedence over the file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if !cli.seeds.is_empty() {
        config.crawler.seeds = cli.seeds.clone();
    }
    if !cli.queries.is_empty() {
        config.benchmark.queries = cli.queries.clone();
    }
    if !cli.batch_sizes.is_empty() {
        config.benchmark.batch_sizes = cli.batch_sizes.clone();
    }
    if cli.no_warmup {
        config.benchmark.warmup_batches.clear();
    }
    if cli.show_urls {
        config.index.show_urls = true;
    }
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Crawldex Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    println!("  Max redirects: {}", config.crawler.max_redirects);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nIndex:");
    println!("  Writer memory: {} bytes", config.index.writer_memory_bytes);
    println!("  Hits per page: {}", config.index.hits_per_page);
    println!("  Show URLs: {}", config.index.show_urls);

    println!("\nSeeds ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("  - {}", seed);
    }

    println!("\nBenchmark:");
    println!("  Warm-up batches: {:?}", config.benchmark.warmup_batches);
    println!("  Timed batches: {:?}", config.benchmark.batch_sizes);
    println!("  Queries ({}):", config.benchmark.queries.len());
    for query in &config.benchmark.queries {
        println!("    * {}", query);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main benchmark run
async fn handle_benchmark(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting benchmark with {} seed URLs and {} queries",
        config.crawler.seeds.len(),
        config.benchmark.queries.len()
    );

    let mut session = open_session(config)?;
    let plan = BenchmarkPlan::from_config(config);

    match run_benchmark(&mut session, &plan, print_step).await {
        Ok(report) => {
            print_report(&report);
            tracing::info!("Benchmark completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Benchmark failed: {}", e);
            Err(e.into())
        }
    }
}
