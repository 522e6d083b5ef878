//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use std::future::Future;
use std::time::Duration;

use placerev_places::{
    fetch_reviews, search_entities, Clock, DirectorySource, FailureKind, PageRequest,
    PlacesClient, PlacesError, SearchQuery,
};
use serde_json::json;
use tokio::sync::watch;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail")
}

fn query(max_results: usize) -> SearchQuery {
    SearchQuery {
        text: "FP Grado Superior ASIR Madrid".to_owned(),
        location: None,
        radius_m: 10_000,
        max_results,
    }
}

/// Clock that never waits, so pagination tests run instantly.
struct NoWait;

impl Clock for NoWait {
    fn sleep(&self, _duration: Duration) -> impl Future<Output = ()> + Send {
        std::future::ready(())
    }
}

#[tokio::test]
async fn search_page_returns_entities_and_token() {
    let server = MockServer::start().await;

    let body = json!({
        "status": "OK",
        "results": [
            { "name": "Centro A", "place_id": "1" },
            { "name": "Centro B", "place_id": "2" }
        ],
        "next_page_token": "NEXT"
    });

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "FP Grado Superior ASIR Madrid"))
        .and(query_param("key", "test-key"))
        .and(query_param("language", "es"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let q = query(60);
    let page = client
        .search_page(PageRequest::First(&q))
        .await
        .expect("should parse search page");

    assert_eq!(page.entities.len(), 2);
    assert_eq!(page.entities[0].name, "Centro A");
    assert_eq!(page.entities[1].external_id.as_deref(), Some("2"));
    assert_eq!(page.next_page_token.as_deref(), Some("NEXT"));
}

#[tokio::test]
async fn zero_results_is_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let q = query(60);
    let page = client.search_page(PageRequest::First(&q)).await.unwrap();

    assert!(page.entities.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn over_query_limit_is_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota for this API."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let q = query(60);
    let err = client
        .search_page(PageRequest::First(&q))
        .await
        .expect_err("quota status must fail");

    assert!(matches!(err, PlacesError::RateLimited(_)), "got: {err:?}");
    assert_eq!(err.kind(), FailureKind::RateLimit);
}

#[tokio::test]
async fn http_429_is_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let q = query(60);
    let err = client.search_page(PageRequest::First(&q)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::RateLimit);
}

#[tokio::test]
async fn server_error_does_not_leak_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.place_details("abc").await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
    assert!(
        !err.to_string().contains("test-key"),
        "error message leaked the API key: {err}"
    );
}

#[tokio::test]
async fn server_error_is_retried_when_enabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": { "name": "Centro A", "reviews": [] }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_retry(3, 0);
    let details = client
        .place_details("1")
        .await
        .expect("should succeed after retries");

    assert_eq!(details.name, "Centro A");
}

#[tokio::test]
async fn fetch_reviews_applies_field_mask_and_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "1"))
        .and(query_param("fields", "review,name,rating"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "name": "Centro A",
                "rating": 4.5,
                "reviews": [
                    { "text": "bien", "rating": 5, "time": 1_700_000_000 },
                    { "rating": 3 },
                    {}
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = fetch_reviews(&client, "1", 10).await.unwrap();

    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[0].text, "bien");
    assert_eq!(reviews[0].rating, 5);
    assert_eq!(reviews[1].text, "");
    assert_eq!(reviews[2].rating, 0);
    assert_eq!(reviews[2].timestamp.timestamp(), 0);
    assert!(reviews.iter().all(|r| r.entity_name == "Centro A"));
}

#[tokio::test]
async fn fetch_reviews_survives_wrong_typed_review_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "name": "Centro A",
                "reviews": [
                    { "text": "bien", "rating": 5, "time": 1_700_000_000 },
                    { "text": "mal", "rating": 1, "time": 1_700_000_000.5 },
                    { "text": "regular", "rating": "3", "time": "ayer" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let reviews = fetch_reviews(&client, "1", 10)
        .await
        .expect("odd field types must not fail the fetch");

    assert_eq!(reviews.len(), 3);
    assert_eq!(reviews[1].text, "mal");
    assert_eq!(reviews[1].rating, 1);
    assert_eq!(reviews[1].timestamp.timestamp(), 1_700_000_000);
    assert_eq!(reviews[2].rating, 3);
    assert_eq!(reviews[2].timestamp.timestamp(), 0);
}

#[tokio::test]
async fn fetch_reviews_caps_at_max_reviews() {
    let server = MockServer::start().await;

    let reviews: Vec<_> = (1..=5)
        .map(|i| json!({ "text": format!("review {i}"), "rating": i }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": { "name": "Centro A", "reviews": reviews }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = fetch_reviews(&client, "1", 2).await.unwrap();

    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].text, "review 1");
    assert_eq!(fetched[1].text, "review 2");
}

#[tokio::test]
async fn fetch_reviews_returns_empty_for_place_without_reviews() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": { "name": "Centro A" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = fetch_reviews(&client, "1", 10).await.unwrap();

    assert!(fetched.is_empty());
}

#[tokio::test]
async fn search_entities_follows_page_tokens_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("pagetoken", "PAGE2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [ { "name": "Centro C", "place_id": "3" } ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "FP Grado Superior ASIR Madrid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                { "name": "Centro A", "place_id": "1" },
                { "name": "Centro B", "place_id": "2" }
            ],
            "next_page_token": "PAGE2"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let (_tx, cancel) = watch::channel(false);
    let outcome = search_entities(&client, &NoWait, &query(60), &cancel)
        .await
        .unwrap();

    let names: Vec<&str> = outcome.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Centro A", "Centro B", "Centro C"]);
    assert_eq!(outcome.pages, 2);
}
