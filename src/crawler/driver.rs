//! Crawl session: frontier, fetcher and index driven in batches
//!
//! A session owns all crawl state for one run. Each call to
//! [`CrawlSession::crawl_batch`] picks up the frontier exactly where the previous
//! call stopped, so a run can grow the index step by step without re-crawling.

use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::is_web_url;
use crate::index::{
    run_queries, Document, DocumentIndex, IndexResult, QueryOptions, QueryReport,
};
use std::time::{Duration, Instant};

/// Outcome of one crawl batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    /// Quota of newly visited URLs the batch was asked for
    pub requested: usize,

    /// URLs visited for the first time during this batch
    ///
    /// Less than `requested` only when the frontier drained first.
    pub newly_visited: usize,

    /// Documents committed to the index
    pub indexed: usize,

    /// Visited URLs whose fetch failed
    pub failed: usize,

    /// Wall-clock time of the whole batch, commit included
    pub elapsed: Duration,
}

impl BatchResult {
    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// True when the frontier ran dry before the quota was met
    pub fn exhausted(&self) -> bool {
        self.newly_visited < self.requested
    }
}

/// Crawl state for one run
pub struct CrawlSession<F> {
    frontier: Frontier,
    fetcher: F,
    index: DocumentIndex,
}

impl<F: PageFetcher> CrawlSession<F> {
    /// Creates a session with an empty frontier
    pub fn new(fetcher: F, index: DocumentIndex) -> Self {
        Self {
            frontier: Frontier::new(),
            fetcher,
            index,
        }
    }

    /// Creates a session whose frontier starts with `seeds`
    pub fn with_seeds<I, S>(fetcher: F, index: DocumentIndex, seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut session = Self::new(fetcher, index);
        for seed in seeds {
            session.frontier.seed(seed);
        }
        session
    }

    /// Adds a seed URL to the back of the frontier
    pub fn seed(&mut self, url: impl Into<String>) {
        self.frontier.seed(url);
    }

    /// Crawls until `target_new_count` more URLs have been visited or the frontier is
    /// empty
    ///
    /// # Batch Flow
    ///
    /// 1. Open an index batch
    /// 2. While the visited set is below `start + target_new_count`:
    ///    a. Pop the next URL; stop if the frontier is empty
    ///    b. Skip it if already visited
    ///    c. Fetch it; on failure drop it (no retry, no requeue)
    ///    d. Index `{url, content}` and offer every outbound link that is an absolute
    ///       http(s) URL
    /// 3. Commit the batch
    ///
    /// The quota counts visits, so failed fetches use it up too.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchResult)` - The batch committed
    /// * `Err(IndexError)` - The index failed; nothing from this batch is committed
    pub async fn crawl_batch(&mut self, target_new_count: usize) -> IndexResult<BatchResult> {
        let started = Instant::now();
        let start_size = self.frontier.visited_count();
        let quota = start_size + target_new_count;
        let mut failed = 0;

        tracing::debug!(
            "Starting batch of {} (visited: {}, pending: {})",
            target_new_count,
            start_size,
            self.frontier.pending()
        );

        let mut batch = self.index.begin_batch()?;

        while self.frontier.visited_count() < quota {
            let Some(url) = self.frontier.pop() else {
                tracing::debug!("Frontier is empty, ending batch early");
                break;
            };

            if !self.frontier.mark_visited(&url) {
                tracing::trace!("Skipping already visited URL: {}", url);
                continue;
            }

            match self.fetcher.fetch(&url).await {
                Ok(page) => {
                    tracing::debug!("Indexed {} ({} links)", url, page.links.len());
                    batch.add(&Document {
                        url,
                        content: page.content,
                    })?;
                    for link in page.links {
                        if is_web_url(&link) {
                            self.frontier.offer(link);
                        } else {
                            tracing::trace!("Dropping non-web link: {}", link);
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!("{}", e);
                    failed += 1;
                }
            }
        }

        let indexed = batch.commit()?;
        let result = BatchResult {
            requested: target_new_count,
            newly_visited: self.frontier.visited_count() - start_size,
            indexed,
            failed,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            "Batch done: {} of {} requested URLs visited, {} indexed, {} failed in {} ms",
            result.newly_visited,
            result.requested,
            result.indexed,
            result.failed,
            result.elapsed_millis()
        );

        Ok(result)
    }

    /// Runs queries against the current index snapshot
    pub fn run_queries<S: AsRef<str>>(
        &self,
        queries: &[S],
        options: &QueryOptions,
    ) -> IndexResult<Vec<QueryReport>> {
        run_queries(&self.index, queries, options)
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn index(&self) -> &DocumentIndex {
        &self.index
    }
}
