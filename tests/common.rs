//! Common test utilities for Storeboard integration tests
//!
//! Each test builds its own application over a private in-memory database
//! and a temporary upload directory, then drives the router directly.
#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use storeboard::{AppState, create_app, db, run_migrations, uploads::UploadStore};
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "storeboard-test-boundary";

/// A running test application
pub struct TestApp {
    pub router: Router,
    pub pool: Arc<db::DbPool>,
    /// Keeps the upload directory alive for the duration of the test
    pub uploads: TempDir,
}

impl TestApp {
    /// Where uploaded images land
    pub fn upload_dir(&self) -> PathBuf {
        self.uploads.path().to_path_buf()
    }

    /// Number of files currently in the upload directory
    pub fn stored_upload_count(&self) -> usize {
        std::fs::read_dir(self.uploads.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Sends a request and returns the status and parsed JSON body
    ///
    /// An empty body parses as `Value::Null`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, body)
    }

    /// Sends a request and returns the status and raw body bytes
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }
}

/// Creates a test application with an in-memory SQLite database
pub fn create_test_app() -> TestApp {
    let database_url = format!(
        "file:integration_{}?mode=memory&cache=shared",
        uuid::Uuid::new_v4()
    );
    let pool = Arc::new(db::init_pool(&database_url).unwrap());
    run_migrations(&mut pool.get().unwrap()).unwrap();

    let uploads = tempfile::tempdir().unwrap();
    let state = AppState::new(pool.clone(), UploadStore::new(uploads.path()));

    TestApp {
        router: create_app(state),
        pool,
        uploads,
    }
}

/// Builds a request with an optional JSON body and authenticated user
pub fn json_request(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }
    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Builds a multipart board post
///
/// `image` is `(file name, bytes)`; pass `None` to leave the file out.
pub fn board_post(user: Option<&str>, fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri("/boards")
        .header("Content-Type", format!("multipart/form-data; boundary={}", BOUNDARY));
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }
    builder.body(Body::from(body)).unwrap()
}

/// The complete text fields of a board in `region`
pub fn board_fields(region: &str) -> Vec<(&'static str, String)> {
    vec![
        ("region", region.to_string()),
        ("title", format!("Meetup in {}", region)),
        ("content", "Anyone around?".to_string()),
        ("meetDate", "2024-03-09".to_string()),
    ]
}

/// Registers a user via the API and returns its id
pub async fn create_user(app: &TestApp, nickname: &str) -> String {
    let body = json!({ "nickname": nickname, "name": format!("{} name", nickname) });
    let (status, user) = app.send(json_request("POST", "/users", None, Some(body))).await;
    assert_eq!(status, StatusCode::CREATED);
    user["id"].as_str().unwrap().to_string()
}

/// Registers a store via the API and returns its id
pub async fn create_store(app: &TestApp, name: &str) -> String {
    let (status, store) = app
        .send(json_request("POST", "/stores", None, Some(json!({ "name": name }))))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    store["id"].as_str().unwrap().to_string()
}

/// Posts a complete board owned by `user` and returns the stored record
pub async fn create_board(app: &TestApp, user: &str, region: &str) -> Value {
    let fields = board_fields(region);
    let fields: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let (status, board) = app
        .send(board_post(Some(user), &fields, Some(("photo.png", b"pixels"))))
        .await;
    assert_eq!(status, StatusCode::CREATED, "board post failed: {}", board);
    board
}
