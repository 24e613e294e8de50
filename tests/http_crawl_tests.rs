//! Integration tests for crawling over HTTP
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch, parse, index and query cycle end-to-end.

use crawldex::config::{Config, CrawlerConfig};
use crawldex::crawler::open_session;
use crawldex::index::{QueryOptions, QueryOutcome};
use crawldex::{run_benchmark, BenchmarkPlan};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Creates a test configuration seeded with the given URL
fn create_test_config(seed: String) -> Config {
    let mut config = Config {
        crawler: CrawlerConfig {
            seeds: vec![seed],
            request_timeout_secs: 5,
            connect_timeout_secs: 2,
            max_redirects: 5,
        },
        ..Config::default()
    };
    config.index.writer_memory_bytes = 15_000_000;
    config
}

/// Mounts a small site:
///
/// ```text
/// /        → /about, /news, /about (again), mailto
/// /about   → /, /missing
/// /news    → /data.pdf
/// ```
async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(
            r#"<html><head><title>Home</title><script>var georgia = 1;</script></head>
            <body><h1>Georgia home page</h1>
            <a href="/about">About</a> <a href="news">News</a> <a href="/about">About again</a>
            <a href="mailto:info@example.com">Mail</a></body></html>"#,
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html(
            r#"<html><body><p>Senior graduate programs</p>
            <a href="/">Home</a><a href="/missing">Broken</a></body></html>"#,
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(html(
            r#"<html><body><p>New graduate research</p><a href="/data.pdf">Data</a></body></html>"#,
        ))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46])
                .insert_header("content-type", "application/pdf"),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_over_http() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let base = server.uri();

    let config = create_test_config(format!("{}/", base));
    let mut session = open_session(&config).unwrap();

    let result = session.crawl_batch(50).await.unwrap();

    // /, /about, /news succeed; /missing and /data.pdf fail
    assert_eq!(result.newly_visited, 5);
    assert_eq!(result.indexed, 3);
    assert_eq!(result.failed, 2);
    assert!(result.exhausted());
    assert!(session.frontier().is_visited(&format!("{}/missing", base)));
    assert!(session.frontier().is_visited(&format!("{}/data.pdf", base)));

    let options = QueryOptions {
        hits_per_page: 10,
        collect_urls: true,
    };
    let reports = session
        .run_queries(&["georgia", "graduate", "senior"], &options)
        .unwrap();

    // Script text is not indexed, so only the heading matches
    assert_eq!(reports[0].outcome.hit_count(), Some(1));
    assert_eq!(reports[1].outcome.hit_count(), Some(2));

    let QueryOutcome::Hits(senior) = &reports[2].outcome else {
        panic!("query should parse");
    };
    assert_eq!(senior.total, 1);
    assert_eq!(senior.urls[0].url, format!("{}/about", base));
}

#[tokio::test]
async fn test_benchmark_over_http() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let mut config = create_test_config(format!("{}/", server.uri()));
    config.benchmark.warmup_batches = vec![1];
    config.benchmark.batch_sizes = vec![2, 2];
    config.benchmark.queries = vec!["graduate".to_string()];

    let mut session = open_session(&config).unwrap();
    let report = run_benchmark(&mut session, &BenchmarkPlan::from_config(&config), |_| {})
        .await
        .unwrap();

    let docs: Vec<u64> = report.steps.iter().map(|step| step.total_docs).collect();
    let hits: Vec<Option<usize>> = report
        .steps
        .iter()
        .map(|step| step.queries[0].outcome.hit_count())
        .collect();

    // Visit order: /, /about, /news, /missing, /data.pdf
    assert_eq!(docs, vec![1, 3, 3]);
    assert_eq!(hits, vec![Some(0), Some(2), Some(2)]);
    assert_eq!(report.total_visited(), 5);
}
