use std::time::Duration;

use pretty_assertions::assert_eq;
use search_engine::{FailureKind, FetchSettings, ReqwestFetcher, SearchFetcher};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE_BODY: &str = r#"{
    "hits": [
        {"title": "Redux 5", "url": "https://redux.js.org", "author": "markerikson",
         "num_comments": 20, "points": 150, "objectID": "101"},
        {"title": "Ask HN", "url": null, "author": "someone",
         "num_comments": null, "points": 3, "objectID": "102"}
    ],
    "page": 1
}"#;

fn settings_for(server: &MockServer) -> FetchSettings {
    FetchSettings {
        base_url: format!("{}/api/v1", server.uri()),
        hits_per_page: 100,
        ..FetchSettings::default()
    }
}

#[tokio::test]
async fn fetcher_requests_page_and_decodes_hits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "redux"))
        .and(query_param("page", "1"))
        .and(query_param("hitsPerPage", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAGE_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let page = fetcher.fetch_page("redux", 1).await.expect("fetch ok");

    assert_eq!(page.query, "redux");
    assert_eq!(page.page, 1);
    let ids: Vec<_> = page.hits.iter().map(|h| h.object_id.as_str()).collect();
    assert_eq!(ids, vec!["101", "102"]);
    assert_eq!(page.hits[1].url, None);
}

#[tokio::test]
async fn fetcher_sends_query_as_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .and(query_param("query", "Rust Async"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"hits": [], "page": 0}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let page = fetcher.fetch_page("Rust Async", 0).await.expect("fetch ok");
    assert_eq!(page.query, "Rust Async");
    assert!(page.hits.is_empty());
}

#[tokio::test]
async fn fetcher_keeps_reserved_characters_in_the_query() {
    let server = MockServer::start().await;
    for key in ["C#", "AT&T", "c++"] {
        Mock::given(method("GET"))
            .and(path("/api/v1/search"))
            .and(query_param("query", key))
            .and(query_param("page", "2"))
            .and(query_param("hitsPerPage", "100"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"hits": [], "page": 2}"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    for key in ["C#", "AT&T", "c++"] {
        let page = fetcher.fetch_page(key, 2).await.expect("fetch ok");
        assert_eq!(page.query, key);
        assert_eq!(page.page, 2);
    }
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let err = fetcher.fetch_page("redux", 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn fetcher_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let fetcher = ReqwestFetcher::new(settings_for(&server));
    let err = fetcher.fetch_page("redux", 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(r#"{"hits": [], "page": 0}"#),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher.fetch_page("redux", 0).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hits": [], "page": 0}"#))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let fetcher = ReqwestFetcher::new(settings);
    let err = fetcher.fetch_page("redux", 0).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 10, .. }));
}
