//! Integration tests for batch imports.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{DIR, FILE_A, FILE_B, ROOT, TestApp, file, folder};

#[tokio::test]
async fn test_import_returns_empty_ok() {
    let app = TestApp::new();

    let response = app
        .import(json!([folder(ROOT, None)]), "2022-02-01T12:00:00Z")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::Value::Null);
}

#[tokio::test]
async fn test_file_cannot_be_parent_in_same_batch() {
    let app = TestApp::new();

    let response = app
        .import(
            json!([file(FILE_A, None, "/a", 5), folder(DIR, Some(FILE_A))]),
            "2022-02-01T12:00:00Z",
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 400);
    assert_eq!(app.node(FILE_A).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_type_change_is_rejected() {
    let app = TestApp::new();
    app.import(json!([folder(ROOT, None)]), "2022-02-01T12:00:00Z")
        .await;

    let response = app
        .import(json!([file(ROOT, None, "/a", 1)]), "2022-02-02T12:00:00Z")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let node = app.node(ROOT).await;
    assert_eq!(node.body["type"], "FOLDER");
    assert_eq!(node.body["date"], "2022-02-01T12:00:00.000Z");
}

#[tokio::test]
async fn test_unknown_parent_is_rejected() {
    let app = TestApp::new();

    let response = app
        .import(json!([file(FILE_A, Some(DIR), "/a", 5)]), "2022-02-01T12:00:00Z")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_validation_failed() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/imports", Some(json!({ "items": "nope" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({ "code": 400, "message": "Validation Failed" })
    );

    let response = app
        .import(json!([{ "id": ROOT, "type": "LINK" }]), "2022-02-01T12:00:00Z")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.import(json!([folder(ROOT, None)]), "not a date").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_folder_with_size_is_rejected() {
    let app = TestApp::new();

    let response = app
        .import(
            json!([{ "id": ROOT, "type": "FOLDER", "size": 10 }]),
            "2022-02-01T12:00:00Z",
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reimport_keeps_tree_identical() {
    let app = TestApp::new();
    let items = json!([
        folder(ROOT, None),
        folder(DIR, Some(ROOT)),
        file(FILE_A, Some(DIR), "/a", 5),
        file(FILE_B, Some(ROOT), "/b", 7),
    ]);

    app.import(items.clone(), "2022-02-01T12:00:00Z").await;
    let first = app.node(ROOT).await.body;
    let response = app.import(items, "2022-02-01T12:00:00Z").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.node(ROOT).await.body, first);
}

#[tokio::test]
async fn test_folder_size_overflow_is_rejected() {
    let app = TestApp::new();

    let response = app
        .import(
            json!([
                folder(ROOT, None),
                file(FILE_A, Some(ROOT), "/a", i64::MAX),
                file(FILE_B, Some(ROOT), "/b", i64::MAX),
            ]),
            "2022-02-01T12:00:00Z",
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 400);
    for id in [ROOT, FILE_A, FILE_B] {
        assert_eq!(app.node(id).await.status, StatusCode::NOT_FOUND);
    }
}
