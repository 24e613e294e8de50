//! Batch writer over the shared index
//!
//! A batch owns the index writer for its lifetime. The writer lock is released when
//! the batch is committed or dropped, so an error half-way through a crawl batch never
//! leaves the index locked for the next one.

use crate::index::{Document, Fields, IndexResult};
use tantivy::{IndexWriter, TantivyDocument};

/// A writable session over the [`crate::index::DocumentIndex`]
pub struct IndexBatch {
    writer: IndexWriter,
    fields: Fields,
    added: usize,
}

impl IndexBatch {
    pub(crate) fn new(writer: IndexWriter, fields: Fields) -> Self {
        Self {
            writer,
            fields,
            added: 0,
        }
    }

    /// Adds one document to the batch
    ///
    /// The URL is stored as a single untokenized term; the content is tokenized for
    /// search and stored as-is.
    pub fn add(&mut self, document: &Document) -> IndexResult<()> {
        let mut doc = TantivyDocument::default();
        doc.add_text(self.fields.url, &document.url);
        doc.add_text(self.fields.content, &document.content);
        self.writer.add_document(doc)?;
        self.added += 1;
        Ok(())
    }

    /// Documents added so far
    pub fn len(&self) -> usize {
        self.added
    }

    pub fn is_empty(&self) -> bool {
        self.added == 0
    }

    /// Commits the batch and releases the writer
    ///
    /// # Returns
    ///
    /// The number of documents this batch added
    pub fn commit(mut self) -> IndexResult<usize> {
        self.writer.commit()?;
        tracing::debug!("Committed index batch of {} documents", self.added);
        Ok(self.added)
    }
}
