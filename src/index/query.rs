//! Query runner over the document index
//!
//! Each call opens one reader, so every query in the call sees the same committed
//! snapshot. The reader is dropped on return, including early returns on error.
//!
//! A query string that fails to parse never reaches the searcher: parsing yields
//! either a [`ParsedQuery`] or a [`QueryParseError`], and only the former can be
//! searched. A parse failure is reported for that entry alone.

use crate::index::{DocumentIndex, Fields, IndexResult};
use tantivy::collector::{Count, TopDocs};
use tantivy::query::{Query, QueryParser};
use tantivy::schema::Value;
use tantivy::{Searcher, TantivyDocument};
use thiserror::Error;

/// How each query is evaluated
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Size of the ranked page retrieved per query
    pub hits_per_page: usize,

    /// Resolve the stored URL of every hit on the ranked page
    pub collect_urls: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            hits_per_page: 1000,
            collect_urls: false,
        }
    }
}

/// A query string the query syntax rejected
#[derive(Debug, Clone, Error)]
#[error("Failed to parse query '{query}': {message}")]
pub struct QueryParseError {
    pub query: String,
    pub message: String,
}

/// A query string that parsed against the `content` field
#[derive(Debug)]
pub struct ParsedQuery {
    query: Box<dyn Query>,
}

impl ParsedQuery {
    /// Parses `text` with the default field set on `parser`
    pub fn parse(parser: &QueryParser, text: &str) -> Result<Self, QueryParseError> {
        parser
            .parse_query(text)
            .map(|query| Self { query })
            .map_err(|e| QueryParseError {
                query: text.to_string(),
                message: e.to_string(),
            })
    }

    fn as_query(&self) -> &dyn Query {
        self.query.as_ref()
    }
}

/// A hit on the ranked page
#[derive(Debug, Clone, PartialEq)]
pub struct RankedUrl {
    pub url: String,
    pub score: f32,
}

/// Search results for one query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHits {
    /// Every matching document, not capped by the page size
    pub total: usize,

    /// Hits on the ranked page: `min(total, hits_per_page)`
    pub page_len: usize,

    /// Ranked page URLs, best first; empty unless URLs were requested
    pub urls: Vec<RankedUrl>,
}

/// Outcome of one query entry
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// The query ran against the snapshot
    Hits(QueryHits),

    /// The query string did not parse; nothing was searched
    ParseFailed(QueryParseError),
}

impl QueryOutcome {
    /// Total hit count, or `None` for a query that failed to parse
    pub fn hit_count(&self) -> Option<usize> {
        match self {
            Self::Hits(hits) => Some(hits.total),
            Self::ParseFailed(_) => None,
        }
    }
}

/// A query string together with its outcome
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub query: String,
    pub outcome: QueryOutcome,
}

/// Runs a list of free-text queries against one snapshot of the index
///
/// # Arguments
///
/// * `index` - The session index
/// * `queries` - Query strings, parsed against the `content` field
/// * `options` - Page size and whether to resolve hit URLs
///
/// # Returns
///
/// * `Ok(Vec<QueryReport>)` - One report per query, in input order
/// * `Err(IndexError)` - The reader could not be opened or a search failed
pub fn run_queries<S: AsRef<str>>(
    index: &DocumentIndex,
    queries: &[S],
    options: &QueryOptions,
) -> IndexResult<Vec<QueryReport>> {
    let reader = index.open_reader()?;
    let searcher = reader.searcher();
    let parser = QueryParser::for_index(index.index(), vec![index.fields().content]);

    let mut reports = Vec::with_capacity(queries.len());
    for text in queries {
        let text = text.as_ref();
        let outcome = match ParsedQuery::parse(&parser, text) {
            Ok(parsed) => {
                QueryOutcome::Hits(search(&searcher, &parsed, index.fields(), options)?)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                QueryOutcome::ParseFailed(e)
            }
        };

        reports.push(QueryReport {
            query: text.to_string(),
            outcome,
        });
    }

    Ok(reports)
}

fn search(
    searcher: &Searcher,
    query: &ParsedQuery,
    fields: Fields,
    options: &QueryOptions,
) -> IndexResult<QueryHits> {
    // TopDocs preallocates its limit and panics on zero
    let limit = options
        .hits_per_page
        .min(searcher.num_docs() as usize)
        .max(1);
    let (total, top_docs) =
        searcher.search(query.as_query(), &(Count, TopDocs::with_limit(limit)))?;

    let mut urls = Vec::new();
    if options.collect_urls {
        urls.reserve(top_docs.len());
        for (score, address) in &top_docs {
            let doc: TantivyDocument = searcher.doc(*address)?;
            let url = doc
                .get_first(fields.url)
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string();
            urls.push(RankedUrl { url, score: *score });
        }
    }

    Ok(QueryHits {
        total,
        page_len: top_docs.len(),
        urls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tests::test_index;
    use crate::index::Document;

    fn index_with(docs: &[(&str, &str)]) -> DocumentIndex {
        let index = test_index();
        add_docs(&index, docs);
        index
    }

    fn add_docs(index: &DocumentIndex, docs: &[(&str, &str)]) {
        let mut batch = index.begin_batch().unwrap();
        for (url, content) in docs {
            batch.add(&Document::new(*url, *content)).unwrap();
        }
        batch.commit().unwrap();
    }

    fn hits(report: &QueryReport) -> &QueryHits {
        match &report.outcome {
            QueryOutcome::Hits(hits) => hits,
            QueryOutcome::ParseFailed(e) => panic!("unexpected parse failure: {}", e),
        }
    }

    #[test]
    fn test_counts_matching_documents() {
        let index = index_with(&[
            ("https://example.com/1", "Georgia Tech graduate programs"),
            ("https://example.com/2", "Senior design page"),
            ("https://example.com/3", "graduate admissions page"),
        ]);

        let reports = run_queries(
            &index,
            &["graduate", "page", "missing"],
            &QueryOptions::default(),
        )
        .unwrap();

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].query, "graduate");
        assert_eq!(reports[0].outcome.hit_count(), Some(2));
        assert_eq!(reports[1].outcome.hit_count(), Some(2));
        assert_eq!(reports[2].outcome.hit_count(), Some(0));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let index = index_with(&[("https://example.com/1", "a senior thesis")]);

        let reports = run_queries(&index, &["Senior"], &QueryOptions::default()).unwrap();
        assert_eq!(reports[0].outcome.hit_count(), Some(1));
    }

    #[test]
    fn test_total_is_not_capped_by_page_size() {
        let docs: Vec<(String, String)> = (0..5)
            .map(|n| (format!("https://example.com/{}", n), "georgia".to_string()))
            .collect();
        let borrowed: Vec<(&str, &str)> = docs
            .iter()
            .map(|(u, c)| (u.as_str(), c.as_str()))
            .collect();
        let index = index_with(&borrowed);

        let options = QueryOptions {
            hits_per_page: 2,
            collect_urls: true,
        };
        let reports = run_queries(&index, &["georgia"], &options).unwrap();
        let hits = hits(&reports[0]);

        assert_eq!(hits.total, 5);
        assert_eq!(hits.page_len, 2);
        assert_eq!(hits.urls.len(), 2);
    }

    #[test]
    fn test_collects_ranked_urls() {
        let index = index_with(&[
            ("https://example.com/weak", "rust and other things entirely unrelated"),
            ("https://example.com/strong", "rust rust rust"),
        ]);

        let options = QueryOptions {
            hits_per_page: 10,
            collect_urls: true,
        };
        let reports = run_queries(&index, &["rust"], &options).unwrap();
        let hits = hits(&reports[0]);

        assert_eq!(hits.urls.len(), 2);
        assert_eq!(hits.urls[0].url, "https://example.com/strong");
        assert!(hits.urls[0].score >= hits.urls[1].score);
    }

    #[test]
    fn test_urls_not_collected_by_default() {
        let index = index_with(&[("https://example.com/1", "rust")]);

        let reports = run_queries(&index, &["rust"], &QueryOptions::default()).unwrap();
        let hits = hits(&reports[0]);
        assert_eq!(hits.page_len, 1);
        assert!(hits.urls.is_empty());
    }

    #[test]
    fn test_url_field_is_exact_match() {
        let index = index_with(&[("https://example.com/Page", "body text")]);

        let reports = run_queries(
            &index,
            &[r#"url:"https://example.com/Page""#, "url:page"],
            &QueryOptions::default(),
        )
        .unwrap();

        assert_eq!(reports[0].outcome.hit_count(), Some(1));
        assert_eq!(reports[1].outcome.hit_count(), Some(0));
    }

    #[test]
    fn test_malformed_query_does_not_affect_others() {
        let index = index_with(&[
            ("https://example.com/1", "georgia page"),
            ("https://example.com/2", "georgia"),
        ]);

        let reports = run_queries(
            &index,
            &["georgia", "nosuchfield:georgia", "content:", "page"],
            &QueryOptions::default(),
        )
        .unwrap();

        assert_eq!(reports[0].outcome.hit_count(), Some(2));
        assert!(matches!(
            &reports[1].outcome,
            QueryOutcome::ParseFailed(e) if e.query == "nosuchfield:georgia"
        ));
        assert_eq!(reports[1].outcome.hit_count(), None);
        assert!(matches!(
            &reports[2].outcome,
            QueryOutcome::ParseFailed(e) if e.query == "content:"
        ));
        assert_eq!(reports[3].outcome.hit_count(), Some(1));
    }

    #[test]
    fn test_huge_page_size_is_bounded_by_index_size() {
        let index = index_with(&[
            ("https://example.com/1", "georgia page"),
            ("https://example.com/2", "georgia"),
        ]);
        let options = QueryOptions {
            hits_per_page: usize::MAX / 2,
            collect_urls: true,
        };

        let reports = run_queries(&index, &["georgia"], &options).unwrap();

        let hits = hits(&reports[0]);
        assert_eq!(hits.total, 2);
        assert_eq!(hits.page_len, 2);
        assert_eq!(hits.urls.len(), 2);
    }

    #[test]
    fn test_counts_never_decrease_as_documents_are_added() {
        let index = index_with(&[
            ("https://example.com/1", "new graduate page"),
            ("https://example.com/2", "nothing here"),
        ]);
        let queries = ["new", "graduate", "page", "nothing"];

        let before: Vec<Option<usize>> = run_queries(&index, &queries, &QueryOptions::default())
            .unwrap()
            .iter()
            .map(|r| r.outcome.hit_count())
            .collect();

        add_docs(
            &index,
            &[
                ("https://example.com/3", "another new page"),
                ("https://example.com/4", "unrelated"),
            ],
        );

        let after: Vec<Option<usize>> = run_queries(&index, &queries, &QueryOptions::default())
            .unwrap()
            .iter()
            .map(|r| r.outcome.hit_count())
            .collect();

        for (b, a) in before.iter().zip(&after) {
            assert!(a >= b);
        }
        assert_eq!(after[0], Some(2));
    }

    #[test]
    fn test_empty_index_returns_zero_hits() {
        let index = test_index();
        let reports = run_queries(&index, &["anything"], &QueryOptions::default()).unwrap();
        assert_eq!(reports[0].outcome.hit_count(), Some(0));
    }
}
