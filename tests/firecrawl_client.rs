//! Integration tests for `FirecrawlCrawler` using wiremock HTTP mocks.

use rental_scout::crawl::{CrawlOptions, Crawler, FirecrawlCrawler};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_URL: &str = "https://rent.test/rental-properties/aarhus/2-rooms/?max_monthly_rent=9000";

fn test_crawler(base_url: &str) -> FirecrawlCrawler {
    let options = CrawlOptions {
        poll_interval: Duration::from_millis(10),
        ..CrawlOptions::default()
    };
    FirecrawlCrawler::with_options("fc-test", base_url, options)
        .expect("client construction should not fail")
}

async fn mount_job(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .and(header("authorization", "Bearer fc-test"))
        .and(body_partial_json(serde_json::json!({
            "url": SEARCH_URL,
            "limit": 15,
            "scrapeOptions": { "formats": ["html", "links"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "id": "job-1",
            "url": "https://api.firecrawl.dev/v1/crawl/job-1"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn completed_job_returns_fragments_in_order() {
    let server = MockServer::start().await;
    mount_job(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "completed",
            "total": 2,
            "completed": 2,
            "data": [
                {
                    "html": "<body><h1>Harbour flat</h1><p>8,900 DKK</p><p>2 rooms</p></body>",
                    "links": ["/rental-properties/aarhus/42", "/about"]
                },
                {
                    "markdown": "Studio\n5,000 kr.",
                    "links": []
                }
            ]
        })))
        .mount(&server)
        .await;

    let crawler = test_crawler(&server.uri());
    let fragments = crawler.crawl(SEARCH_URL).await.expect("crawl should succeed");

    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text, "Harbour flat\n8,900 DKK\n2 rooms");
    assert_eq!(fragments[0].links[0], "/rental-properties/aarhus/42");
    assert_eq!(fragments[1].text, "Studio\n5,000 kr.");
}

#[tokio::test]
async fn polls_until_job_completes() {
    let server = MockServer::start().await;
    mount_job(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "scraping",
            "total": 3,
            "completed": 1
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "completed",
            "data": [{ "markdown": "Loft\n7,500 DKK", "links": [] }]
        })))
        .mount(&server)
        .await;

    let crawler = test_crawler(&server.uri());
    let fragments = crawler.crawl(SEARCH_URL).await.expect("crawl should succeed");

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].text, "Loft\n7,500 DKK");
}

#[tokio::test]
async fn failed_job_is_an_error() {
    let server = MockServer::start().await;
    mount_job(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "failed",
            "error": "blocked by robots.txt"
        })))
        .mount(&server)
        .await;

    let crawler = test_crawler(&server.uri());
    let err = crawler.crawl(SEARCH_URL).await.unwrap_err();

    assert!(err.to_string().contains("blocked by robots.txt"));
}

#[tokio::test]
async fn rejected_start_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(ResponseTemplate::new(402).set_body_string("payment required"))
        .mount(&server)
        .await;

    let crawler = test_crawler(&server.uri());
    let err = crawler.crawl(SEARCH_URL).await.unwrap_err();

    assert!(err.to_string().contains("402"));
}
