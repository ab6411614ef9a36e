//! Integration tests for node history.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{FILE_A, MISSING, ROOT, TestApp, file, folder};

async fn seeded() -> TestApp {
    let app = TestApp::new();
    app.import(json!([folder(ROOT, None)]), "2022-02-01T00:00:00Z")
        .await;
    app.import(
        json!([file(FILE_A, Some(ROOT), "/a", 5)]),
        "2022-02-02T00:00:00Z",
    )
    .await;
    app.import(
        json!([file(FILE_A, Some(ROOT), "/a", 8)]),
        "2022-02-03T00:00:00Z",
    )
    .await;
    app
}

fn sizes(body: &serde_json::Value) -> Vec<i64> {
    body["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|r| r["size"].as_i64().expect("size"))
        .collect()
}

#[tokio::test]
async fn test_folder_history_tracks_sizes() {
    let app = seeded().await;

    let response = app
        .request("GET", &format!("/node/{ROOT}/history"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(sizes(&response.body), vec![0, 5, 8]);
    assert_eq!(response.body["items"][2]["date"], "2022-02-03T00:00:00.000Z");
}

#[tokio::test]
async fn test_history_range_is_half_open() {
    let app = seeded().await;

    let response = app
        .request(
            "GET",
            &format!(
                "/node/{ROOT}/history?dateStart=2022-02-02T00:00:00Z&dateEnd=2022-02-03T00:00:00Z"
            ),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(sizes(&response.body), vec![5]);
}

#[tokio::test]
async fn test_history_errors() {
    let app = seeded().await;

    let response = app
        .request("GET", &format!("/node/{MISSING}/history"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/node/{ROOT}/history?dateStart=garbage"), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "GET",
            &format!(
                "/node/{ROOT}/history?dateStart=2022-02-03T00:00:00Z&dateEnd=2022-02-01T00:00:00Z"
            ),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_history_removed_with_node() {
    let app = seeded().await;
    app.request("DELETE", &format!("/delete/{ROOT}"), None).await;

    let response = app
        .request("GET", &format!("/node/{FILE_A}/history"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
