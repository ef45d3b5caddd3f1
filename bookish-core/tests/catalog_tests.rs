//! Catalog tests against a stubbed Google Books server

use bookish_core::catalog::{CatalogProvider, GoogleBooks, SearchPager};
use bookish_core::{CatalogBook, CatalogError, Config};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer) -> GoogleBooks {
    let uri = format!("{}/books/v1", server.uri());
    let config = Config::from_lookup(|key| match key {
        "BOOKISH_CATALOG_URL" => Some(uri.clone()),
        "BOOKISH_TOKEN_PATH" => Some("unused-token".to_string()),
        _ => None,
    })
    .unwrap();
    GoogleBooks::new(&config).unwrap()
}

fn volume(id: &str, title: &str, cover: bool) -> Value {
    let mut info = json!({
        "title": title,
        "authors": ["J.K. Rowling"],
        "averageRating": 4.5,
        "ratingsCount": 1200
    });
    if cover {
        info["imageLinks"] = json!({ "thumbnail": format!("http://books.google.com/{}", id) });
    }
    json!({ "id": id, "volumeInfo": info })
}

#[tokio::test]
async fn test_search_pages_through_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("q", "harry potter"))
        .and(query_param("startIndex", "0"))
        .and(query_param("maxResults", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 3,
            "items": [volume("a", "Philosopher's Stone", true), volume("b", "Chamber of Secrets", false)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("startIndex", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalItems": 3,
            "items": [volume("a", "Philosopher's Stone (again)", true), volume("c", "Prisoner of Azkaban", true)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let mut pager = SearchPager::new(&catalog, "  harry   potter ", 2);
    assert_eq!(pager.query(), "harry+potter");

    let first = pager.try_fetch_more().await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].image.as_deref(), Some("https://books.google.com/a"));
    assert_eq!(pager.total(), Some(3));

    let second = pager.try_fetch_more().await.unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].volume_id, "c");
    assert!(!pager.has_more());

    let results = pager.into_results();
    let titles: Vec<_> = results.items.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Philosopher's Stone", "Prisoner of Azkaban"]);
    assert_eq!(results.total_items, 3);
}

#[tokio::test]
async fn test_empty_query_never_reaches_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "totalItems": 0 })))
        .expect(0)
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let results = SearchPager::new(&catalog, " \t ", 20).collect(3).await;
    assert!(results.items.is_empty());
    assert_eq!(results.total_items, 0);
}

#[tokio::test]
async fn test_quota_exhaustion() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded",
                "errors": [{ "reason": "rateLimitExceeded" }]
            }
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);

    let mut pager = SearchPager::new(&catalog, "dune", 20);
    assert!(pager.fetch_more().await.is_empty());
    assert_eq!(pager.offset(), 0);

    let err = pager.try_fetch_more().await.unwrap_err();
    assert!(matches!(err, CatalogError::QuotaExhausted));
}

#[tokio::test]
async fn test_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "Invalid value", "errors": [{ "reason": "invalid" }] }
        })))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    match catalog.search("dune", 0, 20).await {
        Err(CatalogError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid value");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_volume_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes/a"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(volume("a", "Philosopher's Stone", true)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books/v1/volumes/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let catalog = catalog_for(&server);
    let book = catalog.volume("a").await.unwrap();
    assert_eq!(book.title, "Philosopher's Stone");
    assert_eq!(book.ratings_count, Some(1200));

    assert!(matches!(
        catalog.volume("gone").await,
        Err(CatalogError::NotFound(id)) if id == "gone"
    ));
}

#[test]
fn test_normalized_summary_snapshot() {
    let mut book = CatalogBook::new("zyTCAlFPjgYC", "The Google Story");
    book.authors = vec!["David A. Vise".to_string(), "Mark Malseed".to_string()];
    book.image = Some("https://books.google.com/zyTCAlFPjgYC".to_string());
    book.average_rating = Some(3.5);
    book.ratings_count = Some(136);
    book.page_count = Some(207);

    let json = serde_json::to_string_pretty(&book.summary()).unwrap();
    insta::assert_snapshot!(json, @r###"
    {
      "volumeId": "zyTCAlFPjgYC",
      "title": "The Google Story",
      "image": "https://books.google.com/zyTCAlFPjgYC",
      "author": "David A. Vise",
      "averageRating": 3.5,
      "ratingsCount": 136
    }
    "###);
}
