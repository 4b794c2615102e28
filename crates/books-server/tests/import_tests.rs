//! CSV import endpoint tests
//!
//! Uploads are built as raw multipart bodies and sent through the full
//! router over an in-memory store.

use axum::http::StatusCode;
use books_server::config::Config;
use serde_json::json;

mod helpers;

use helpers::TestApp;

#[tokio::test]
async fn test_import_all_valid_rows() {
    let app = TestApp::new();
    let csv = b"title,author,publishedYear\nDune,Frank Herbert,1965\nSolaris,Stanislaw Lem,1961\n";

    let (status, body) = app.upload("file", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Import complete", "imported": 2, "failed": 0, "errors": []})
    );

    let (_, books) = app.get("/api/books").await;
    assert_eq!(books.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_import_reports_failed_rows() {
    let app = TestApp::new();
    let csv = b"title,author,publishedYear\nDune,Herbert,1965\n,NoTitle,2020\n";

    let (status, body) = app.upload("file", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Import complete");
    assert_eq!(body["imported"], 1);
    assert_eq!(body["failed"], 1);

    let error = &body["errors"][0];
    assert_eq!(error["row"], 3);
    assert_eq!(
        error["data"],
        json!({"title": "", "author": "NoTitle", "publishedYear": "2020"})
    );
    assert_eq!(error["reason"]["kind"], "validation");
    assert_eq!(error["reason"]["issues"][0]["field"], "title");
    assert_eq!(error["reason"]["issues"][0]["code"], "too_small");

    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_import_quoted_field_with_comma() {
    let app = TestApp::new();
    let csv = b"title,author,publishedYear\n\"Good Omens, The Nice and Accurate Prophecies\",\"Pratchett, Gaiman\",1990\n";

    let (status, body) = app.upload("file", csv).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], 1);

    let (_, books) = app.get("/api/books").await;
    assert_eq!(books[0]["title"], "Good Omens, The Nice and Accurate Prophecies");
    assert_eq!(books[0]["author"], "Pratchett, Gaiman");
}

#[tokio::test]
async fn test_import_header_only() {
    let app = TestApp::new();

    let (status, body) = app.upload("file", b"title,author,publishedYear\n").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], 0);
    assert_eq!(body["failed"], 0);
    assert_eq!(body["errors"], json!([]));
}

#[tokio::test]
async fn test_import_unterminated_quote_row() {
    let app = TestApp::new();
    let csv = b"title,author,publishedYear\n\"Broken,Someone,2001\nFine,Someone,2001\n";

    let (status, body) = app.upload("file", csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], 1);
    assert_eq!(body["errors"][0]["row"], 2);
    assert_eq!(body["errors"][0]["reason"]["kind"], "invalid_data");
}

#[tokio::test]
async fn test_import_without_file_field() {
    let app = TestApp::new();

    let (status, body) = app.upload("attachment", b"title,author,publishedYear\n").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No file uploaded"}));
}

#[tokio::test]
async fn test_import_non_multipart_request() {
    let app = TestApp::new();

    let (status, body) = app.post_json("/api/books/import", json!({"title": "Dune"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "No file uploaded"}));
}

#[tokio::test]
async fn test_import_exceeding_upload_limit() {
    let mut config = Config::default();
    config.import.max_upload_bytes = 256;
    let app = TestApp::with_config(config);

    let mut csv = b"title,author,publishedYear\n".to_vec();
    for i in 0..100 {
        csv.extend_from_slice(format!("Book {i},Author {i},2000\n").as_bytes());
    }

    let (status, body) = app.upload("file", &csv).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body, json!({"error": "File too large"}));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_repeated_imports_are_not_deduplicated() {
    let app = TestApp::new();
    let csv = b"title,author,publishedYear\nDune,Frank Herbert,1965\n";

    app.upload("file", csv).await;
    app.upload("file", csv).await;

    assert_eq!(app.store.len().await, 2);
}
