//! Full-text index for crawled pages
//!
//! This module wraps a single in-memory tantivy index that lives for the whole
//! session. It provides:
//! - Batch writers that append documents and release the writer lock on drop
//! - A query runner that evaluates free-text queries against the `content` field
//!
//! The index does not deduplicate: a URL added twice is held twice. Keeping each URL
//! to one document is the frontier's job.

mod query;
mod writer;

pub use query::{
    run_queries, ParsedQuery, QueryHits, QueryOptions, QueryOutcome, QueryParseError,
    QueryReport, RankedUrl,
};
pub use writer::IndexBatch;

use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};
use tantivy::{Index, IndexReader, ReloadPolicy, TantivyError};
use thiserror::Error;

/// Name of the exact-match URL field
pub const URL_FIELD: &str = "url";

/// Name of the tokenized body field; also the default query field
pub const CONTENT_FIELD: &str = "content";

/// Errors raised by the index layer
///
/// These are fatal for a benchmark run: nothing downstream tries to recover.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] TantivyError),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// A fetched page as submitted to the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Stored verbatim, unanalyzed
    pub url: String,

    /// Stored and tokenized
    pub content: String,
}

impl Document {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Field handles resolved once from the schema
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields {
    pub url: Field,
    pub content: Field,
}

/// The session-wide document index
pub struct DocumentIndex {
    index: Index,
    fields: Fields,
    writer_memory_bytes: usize,
}

impl DocumentIndex {
    /// Creates an empty in-memory index
    ///
    /// # Arguments
    ///
    /// * `writer_memory_bytes` - Memory budget handed to each batch writer; must be at
    ///   least [`crate::config::MIN_WRITER_MEMORY_BYTES`]
    pub fn in_memory(writer_memory_bytes: usize) -> Self {
        let mut builder = Schema::builder();
        let url = builder.add_text_field(URL_FIELD, STRING | STORED);
        let content = builder.add_text_field(CONTENT_FIELD, TEXT | STORED);
        let index = Index::create_in_ram(builder.build());

        Self {
            index,
            fields: Fields { url, content },
            writer_memory_bytes,
        }
    }

    /// Opens a writable batch over the index
    ///
    /// Only one batch may be open at a time. Documents become visible to readers once
    /// [`IndexBatch::commit`] returns; dropping the batch without committing discards
    /// them and releases the writer.
    pub fn begin_batch(&self) -> IndexResult<IndexBatch> {
        let writer = self
            .index
            .writer_with_num_threads(1, self.writer_memory_bytes)?;
        Ok(IndexBatch::new(writer, self.fields))
    }

    /// Opens a reader on the latest committed state
    pub(crate) fn open_reader(&self) -> IndexResult<IndexReader> {
        let reader: IndexReader = self
            .index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        Ok(reader)
    }

    /// Number of committed documents
    pub fn num_docs(&self) -> IndexResult<u64> {
        Ok(self.open_reader()?.searcher().num_docs())
    }

    pub(crate) fn index(&self) -> &Index {
        &self.index
    }

    pub(crate) fn fields(&self) -> Fields {
        self.fields
    }
}

impl std::fmt::Debug for DocumentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentIndex")
            .field("writer_memory_bytes", &self.writer_memory_bytes)
            .finish_non_exhaustive()
    }
}
