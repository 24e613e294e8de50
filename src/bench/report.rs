//! Plain-text rendering of benchmark steps and the final summary

use crate::bench::{BenchmarkReport, BenchmarkStep};
use crate::index::QueryOutcome;

/// Renders one step as the lines printed for it
///
/// ```text
/// Indexed 98 documents in 5120 ms. (visited 100, failed 2)
/// Found 42 hits.	georgia
/// Query failed: Failed to parse query 'x:': ...	x:
/// ```
pub fn format_step(step: &BenchmarkStep) -> Vec<String> {
    let batch = &step.batch;
    let mut lines = Vec::with_capacity(step.queries.len() + 1);

    let mut header = format!(
        "Indexed {} documents in {} ms. (visited {}, failed {})",
        batch.indexed,
        batch.elapsed_millis(),
        batch.newly_visited,
        batch.failed
    );
    if step.warmup {
        header.push_str(" [warm-up]");
    }
    if batch.exhausted() {
        header.push_str(" [frontier exhausted]");
    }
    lines.push(header);

    for report in &step.queries {
        match &report.outcome {
            QueryOutcome::Hits(hits) => {
                lines.push(format!("Found {} hits.\t{}", hits.total, report.query));
                for (rank, ranked) in hits.urls.iter().enumerate() {
                    lines.push(format!(
                        "  {:>4}. {:.4}  {}",
                        rank + 1,
                        ranked.score,
                        ranked.url
                    ));
                }
            }
            QueryOutcome::ParseFailed(e) => {
                lines.push(format!("Query failed: {}\t{}", e, report.query));
            }
        }
    }

    lines
}

/// Prints one step to stdout
pub fn print_step(step: &BenchmarkStep) {
    for line in format_step(step) {
        println!("{}", line);
    }
}

/// Prints the run summary to stdout
///
/// # Arguments
///
/// * `report` - The finished run
pub fn print_report(report: &BenchmarkReport) {
    println!();
    println!("=== Benchmark Summary ===\n");
    println!(
        "  Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Steps: {}", report.steps.len());
    println!("  URLs visited: {}", report.total_visited());
    println!("  Documents indexed: {}", report.total_docs());
    println!(
        "  Timed indexing: {} ms",
        report.timed_indexing().as_millis()
    );
}
