//! Benchmark harness for repeated crawl-then-query cycles
//!
//! This module handles:
//! - Turning configuration into a benchmark plan
//! - Running each batch through the crawl session, then the query list
//! - Reporting every step as it completes and summarizing the run

mod report;

pub use report::{format_step, print_report, print_step};

use crate::config::Config;
use crate::crawler::{BatchResult, CrawlSession, PageFetcher};
use crate::index::{IndexResult, QueryOptions, QueryReport};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// What a benchmark run does, in order
#[derive(Debug, Clone)]
pub struct BenchmarkPlan {
    /// Batches run before the timed ones
    pub warmup_batches: Vec<usize>,

    /// Timed batch sizes
    pub batch_sizes: Vec<usize>,

    /// Queries evaluated after every batch
    pub queries: Vec<String>,

    pub query_options: QueryOptions,
}

impl BenchmarkPlan {
    pub fn from_config(config: &Config) -> Self {
        Self {
            warmup_batches: config.benchmark.warmup_batches.clone(),
            batch_sizes: config.benchmark.batch_sizes.clone(),
            queries: config.benchmark.queries.clone(),
            query_options: QueryOptions {
                hits_per_page: config.index.hits_per_page,
                collect_urls: config.index.show_urls,
            },
        }
    }

    /// Every batch in execution order, flagged `true` for warm-up batches
    fn batches(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.warmup_batches
            .iter()
            .map(|size| (*size, true))
            .chain(self.batch_sizes.iter().map(|size| (*size, false)))
    }
}

/// One batch followed by one query pass
#[derive(Debug, Clone)]
pub struct BenchmarkStep {
    /// Position in the run, starting at 1
    pub step: usize,

    pub warmup: bool,

    pub batch: BatchResult,

    /// Committed documents after the batch
    pub total_docs: u64,

    pub queries: Vec<QueryReport>,
}

impl BenchmarkStep {
    pub fn batch_size(&self) -> usize {
        self.batch.requested
    }
}

/// A complete benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub started_at: DateTime<Utc>,
    pub steps: Vec<BenchmarkStep>,
}

impl BenchmarkReport {
    /// Indexing time of the timed (non warm-up) steps
    pub fn timed_indexing(&self) -> Duration {
        self.steps
            .iter()
            .filter(|step| !step.warmup)
            .map(|step| step.batch.elapsed)
            .sum()
    }

    /// URLs visited over the whole run
    pub fn total_visited(&self) -> usize {
        self.steps.iter().map(|step| step.batch.newly_visited).sum()
    }

    /// Documents in the index at the end of the run
    pub fn total_docs(&self) -> u64 {
        self.steps.last().map(|step| step.total_docs).unwrap_or(0)
    }
}

/// Runs the plan against a session
///
/// For every batch size, warm-up first: crawl a batch of that size (timed), then run
/// the query list against the index. `on_step` is called after each step so progress
/// can be shown while the run is still going.
///
/// # Returns
///
/// * `Ok(BenchmarkReport)` - Every step ran
/// * `Err(IndexError)` - The index failed; the run stops at that step
pub async fn run_benchmark<F, C>(
    session: &mut CrawlSession<F>,
    plan: &BenchmarkPlan,
    mut on_step: C,
) -> IndexResult<BenchmarkReport>
where
    F: PageFetcher,
    C: FnMut(&BenchmarkStep),
{
    let started_at = Utc::now();
    let mut steps = Vec::new();

    for (position, (size, warmup)) in plan.batches().enumerate() {
        tracing::info!(
            "Step {}: crawling batch of {}{}",
            position + 1,
            size,
            if warmup { " (warm-up)" } else { "" }
        );

        let batch = session.crawl_batch(size).await?;
        let queries = session.run_queries(&plan.queries, &plan.query_options)?;

        let step = BenchmarkStep {
            step: position + 1,
            warmup,
            batch,
            total_docs: session.index().num_docs()?,
            queries,
        };
        on_step(&step);
        steps.push(step);
    }

    Ok(BenchmarkReport { started_at, steps })
}
