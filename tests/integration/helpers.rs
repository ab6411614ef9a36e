//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use filetree_api::{AppState, build_router};
use filetree_core::config::{AppConfig, DatabaseBackend};
use filetree_database::persistence::MemoryPersistence;
use filetree_service::NodeService;

pub const ROOT: &str = "069cb8d7-bbdd-47d3-ad8f-82ef4c269df1";
pub const DIR: &str = "d515e43f-f3f6-4471-bb77-6b455017a2d2";
pub const FILE_A: &str = "863e1a7a-1304-42ae-943b-179184c077e3";
pub const FILE_B: &str = "b1d8fd7d-2ae3-47d5-b2f9-0f094af800d4";
pub const MISSING: &str = "00000000-0000-0000-0000-999999999999";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application on the in-memory backend
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;

        let service = NodeService::new(Arc::new(MemoryPersistence::new()));
        let router = build_router(AppState::new(config, service));
        Self { router }
    }

    /// Send a request and parse the JSON response body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// POST /imports with the given items and date
    pub async fn import(&self, items: Value, update_date: &str) -> TestResponse {
        self.request(
            "POST",
            "/imports",
            Some(json!({ "items": items, "updateDate": update_date })),
        )
        .await
    }

    /// GET /nodes/{id}
    pub async fn node(&self, id: &str) -> TestResponse {
        self.request("GET", &format!("/nodes/{id}"), None).await
    }
}

/// Parsed response
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A folder import item
pub fn folder(id: &str, parent: Option<&str>) -> Value {
    json!({ "id": id, "parentId": parent, "type": "FOLDER" })
}

/// A file import item
pub fn file(id: &str, parent: Option<&str>, url: &str, size: i64) -> Value {
    json!({ "id": id, "parentId": parent, "type": "FILE", "url": url, "size": size })
}
