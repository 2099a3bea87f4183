//! Metadata HTTP clients against httpmock servers
#![allow(clippy::unwrap_used)]

mod common;

use common::print_test_header;
use httpmock::prelude::*;
use library_service::config::Config;
use library_service::contract::MetadataSource;
use library_service::domain::MetadataProvider;
use library_service::infra::metadata::{
    build_providers, http_client, GoogleBooksClient, JikanClient, MetadataClientError,
    OpenLibraryClient,
};
use serde_json::json;
use std::time::Duration;

fn client() -> reqwest::Client {
    http_client(&Config::default()).unwrap()
}

#[tokio::test]
async fn test_open_library_isbn_lookup() {
    print_test_header(
        "test_open_library_isbn_lookup",
        &["bibkeys lookups are mapped; unknown ISBNs are None"],
    );
    let server = MockServer::start_async().await;
    let found = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/books")
                .query_param("bibkeys", "ISBN:9780441172719")
                .query_param("format", "json")
                .query_param("jscmd", "data");
            then.status(200).json_body(json!({
                "ISBN:9780441172719": {
                    "title": "Dune",
                    "authors": [{"name": "Frank Herbert"}],
                    "publish_date": "1990",
                    "number_of_pages": 535,
                    "cover": {"medium": "https://covers.openlibrary.org/b/id/1-M.jpg"},
                    "key": "/books/OL1M"
                }
            }));
        })
        .await;
    let missing = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/books")
                .query_param("bibkeys", "ISBN:0000000000");
            then.status(200).json_body(json!({}));
        })
        .await;

    let ol = OpenLibraryClient::new(client(), &format!("{}/", server.base_url()));
    let meta = ol.find_by_isbn("9780441172719").await.unwrap().unwrap();
    assert_eq!(meta.source, MetadataSource::OpenLibrary);
    assert_eq!(meta.title.as_deref(), Some("Dune"));
    assert_eq!(meta.author.as_deref(), Some("Frank Herbert"));
    assert_eq!(meta.page_count, Some(535));
    assert_eq!(meta.isbn.as_deref(), Some("9780441172719"));
    assert_eq!(meta.source_id.as_deref(), Some("/books/OL1M"));
    found.assert_async().await;

    assert!(ol.find_by_isbn("0000000000").await.unwrap().is_none());
    missing.assert_async().await;
}

#[tokio::test]
async fn test_google_books_queries_and_errors() {
    print_test_header(
        "test_google_books_queries_and_errors",
        &[
            "Title queries use intitle: and carry the API key",
            "Non-success statuses surface as API errors, 404 as None",
        ],
    );
    let server = MockServer::start_async().await;
    let by_title = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/volumes")
                .query_param("q", "intitle:Dune")
                .query_param("key", "secret");
            then.status(200).json_body(json!({
                "totalItems": 1,
                "items": [{
                    "id": "B1hSG45JCX4C",
                    "volumeInfo": {
                        "title": "Dune",
                        "authors": ["Frank Herbert"],
                        "industryIdentifiers": [{"type": "ISBN_13", "identifier": "9780441172719"}]
                    }
                }]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/volumes")
                .query_param("q", "isbn:9780134685991");
            then.status(500).body("backend unavailable");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/volumes")
                .query_param("q", "isbn:0134685997");
            then.status(404);
        })
        .await;

    let google = GoogleBooksClient::new(client(), &server.base_url(), Some("secret".into()));
    let meta = google.find_by_title("Dune").await.unwrap().unwrap();
    assert_eq!(meta.source_id.as_deref(), Some("B1hSG45JCX4C"));
    assert_eq!(meta.isbn.as_deref(), Some("9780441172719"));
    by_title.assert_async().await;

    let err = google.find_by_isbn("9780134685991").await.unwrap_err();
    match err.downcast_ref::<MetadataClientError>() {
        Some(MetadataClientError::Api { status, body, .. }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "backend unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(google.find_by_isbn("0134685997").await.unwrap().is_none());
}

#[tokio::test]
async fn test_google_books_unreadable_json() {
    print_test_header(
        "test_google_books_unreadable_json",
        &["A body that is not JSON is a parse error"],
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/volumes");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let google = GoogleBooksClient::new(client(), &server.base_url(), None);
    let err = google.find_by_title("Dune").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MetadataClientError>(),
        Some(MetadataClientError::Parse { .. })
    ));
}

#[tokio::test]
async fn test_jikan_lookups() {
    print_test_header(
        "test_jikan_lookups",
        &["Search takes the most popular hit; ids hit /manga/{id}"],
    );
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/manga")
                .query_param("q", "one piece")
                .query_param("limit", "1")
                .query_param("order_by", "popularity");
            then.status(200).json_body(json!({
                "data": [{
                    "mal_id": 13,
                    "title": "One Piece",
                    "authors": [{"name": "Oda, Eiichiro"}],
                    "chapters": null,
                    "published": {"from": "1997-07-22T00:00:00+00:00"},
                    "images": {"jpg": {"image_url": "op.jpg"}}
                }]
            }));
        })
        .await;
    let by_id = server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/2");
            then.status(200).json_body(json!({
                "data": {"mal_id": 2, "title": "Berserk", "chapters": 380}
            }));
        })
        .await;

    let jikan = JikanClient::new(client(), &server.base_url(), Duration::from_millis(1));
    let hit = jikan.find_by_title("one piece").await.unwrap().unwrap();
    assert_eq!(hit.isbn.as_deref(), Some("MAL-13"));
    assert_eq!(hit.published_date.as_deref(), Some("1997-07-22"));
    assert_eq!(hit.thumbnail_url.as_deref(), Some("op.jpg"));
    search.assert_async().await;

    let berserk = jikan.find_by_id("2").await.unwrap().unwrap();
    assert_eq!(berserk.title.as_deref(), Some("Berserk"));
    assert_eq!(berserk.chapters, Some(380));
    by_id.assert_async().await;
}

#[tokio::test]
async fn test_disabled_sources_never_answer() {
    print_test_header(
        "test_disabled_sources_never_answer",
        &["A disabled source answers every lookup with None"],
    );
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/2");
            then.status(200)
                .json_body(json!({"data": {"mal_id": 2, "title": "Berserk"}}));
        })
        .await;

    let config = Config {
        jikan_base_url: server.base_url(),
        enable_jikan: false,
        ..Config::default()
    };
    let providers = build_providers(&config).unwrap();
    assert_eq!(providers.jikan.source(), MetadataSource::Jikan);
    assert!(providers.jikan.find_by_id("2").await.unwrap().is_none());
}
