//! Crawl frontier: pending URLs plus the visited set
//!
//! URLs are compared byte-for-byte. The queue may hold a URL more than once and may
//! hold URLs that were visited after they were queued; both are collapsed when the
//! URL is popped and [`Frontier::mark_visited`] reports it as already seen.

use std::collections::{HashSet, VecDeque};

/// FIFO queue of pending URLs and the set of URLs already visited
#[derive(Debug, Default)]
pub struct Frontier {
    /// Pending URLs, oldest first
    queue: VecDeque<String>,

    /// Every URL handed out for a visit; only ever grows
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a URL without checking it against the visited set
    pub fn seed(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
    }

    /// Removes and returns the oldest pending URL
    ///
    /// A returned URL may already have been visited; callers gate on
    /// [`Frontier::mark_visited`].
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Records a visit
    ///
    /// # Returns
    ///
    /// `true` if the URL had not been visited before
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Queues a URL unless it has already been visited
    ///
    /// # Returns
    ///
    /// `true` if the URL was queued
    pub fn offer(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.visited.contains(&url) {
            tracing::trace!("Not queueing visited URL: {}", url);
            return false;
        }
        self.queue.push_back(url);
        true
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Size of the visited set
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Queue length, duplicates included
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
