//! Integration tests for node lookup, deletion, and recent updates.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{DIR, FILE_A, FILE_B, MISSING, ROOT, TestApp, file, folder};

#[tokio::test]
async fn test_health_probe() {
    let app = TestApp::new();

    let response = app.request("GET", "/test", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "Status": "OK" }));
}

#[tokio::test]
async fn test_child_import_updates_folder() {
    let app = TestApp::new();
    app.import(json!([folder(ROOT, None)]), "2022-02-01T12:00:00Z")
        .await;
    app.import(
        json!([file(FILE_A, Some(ROOT), "/x", 10)]),
        "2022-02-02T12:00:00Z",
    )
    .await;

    let response = app.node(ROOT).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "id": ROOT,
            "url": null,
            "parentId": null,
            "type": "FOLDER",
            "size": 10,
            "date": "2022-02-02T12:00:00.000Z",
            "children": [{
                "id": FILE_A,
                "url": "/x",
                "parentId": ROOT,
                "type": "FILE",
                "size": 10,
                "date": "2022-02-02T12:00:00.000Z",
                "children": null
            }]
        })
    );
}

#[tokio::test]
async fn test_empty_folder_has_zero_size_and_empty_children() {
    let app = TestApp::new();
    app.import(json!([folder(ROOT, None)]), "2022-02-01T12:00:00+03:00")
        .await;

    let response = app.node(ROOT).await;

    assert_eq!(response.body["size"], 0);
    assert_eq!(response.body["children"], json!([]));
    assert_eq!(response.body["date"], "2022-02-01T09:00:00.000Z");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids() {
    let app = TestApp::new();

    let response = app.node(MISSING).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({ "code": 404, "message": "Item not found" })
    );

    let response = app.node("not-a-uuid").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Validation Failed");
}

#[tokio::test]
async fn test_delete_removes_subtree() {
    let app = TestApp::new();
    app.import(
        json!([
            folder(ROOT, None),
            folder(DIR, Some(ROOT)),
            file(FILE_A, Some(DIR), "/a", 5),
            file(FILE_B, Some(ROOT), "/b", 7),
        ]),
        "2022-02-01T12:00:00Z",
    )
    .await;

    let response = app.request("DELETE", &format!("/delete/{DIR}"), None).await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.node(DIR).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.node(FILE_A).await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.node(ROOT).await.body["size"], 7);

    let response = app.request("DELETE", &format!("/delete/{DIR}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_updates_lists_recent_files() {
    let app = TestApp::new();
    app.import(
        json!([folder(ROOT, None), file(FILE_A, Some(ROOT), "/a", 5)]),
        "2022-02-01T12:00:00Z",
    )
    .await;
    app.import(
        json!([file(FILE_B, Some(ROOT), "/b", 7)]),
        "2022-02-02T18:00:00Z",
    )
    .await;

    let response = app
        .request("GET", "/updates?date=2022-02-02T12:00:00Z", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], FILE_A);
    assert_eq!(items[0]["size"], 5);

    let response = app.request("GET", "/updates", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_updates_at_earliest_date_is_empty() {
    let app = TestApp::new();
    app.import(json!([file(FILE_A, None, "/a", 5)]), "2022-02-01T12:00:00Z")
        .await;

    let response = app
        .request("GET", "/updates?date=-262143-01-01T00:00:00", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["items"], json!([]));
}
