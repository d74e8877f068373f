//! Common test utilities for integration tests
//!
//! This module provides shared setup for integration tests. Each
//! `TestApp` owns a fresh temporary directory, so tests are fully
//! isolated and need no external services.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use student_portal_backend::{
    config::AppConfig, routes, services::AuthService, state::AppState, storage,
};
use tempfile::TempDir;
use tower::ServiceExt;

const MULTIPART_BOUNDARY: &str = "portal-test-boundary";

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application backed by a temp directory
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.data_dir = dir.path().join("data");
        config.storage.uploads_dir = dir.path().join("uploads");
        config.auth.bcrypt_cost = 4; // keep hashing fast in tests

        let state = AppState::new(config);
        storage::bootstrap(&state)
            .await
            .expect("Failed to bootstrap storage");

        let app = routes::create_router(state.clone());

        Self {
            app,
            state,
            _dir: dir,
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        self.get_with_cookie(path, None).await
    }

    /// Make a GET request carrying a session cookie
    pub async fn get_with_cookie(
        &self,
        path: &str,
        cookie: Option<&str>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", format!("portal_session={}", cookie));
        }
        let request = builder.body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Make a POST request with JSON body
    pub async fn post(&self, path: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Upload a file as the `photo` field of a multipart form
    pub async fn post_photo(
        &self,
        cookie: Option<&str>,
        filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> (StatusCode, String) {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"photo\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri("/update-photo")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
            );
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", format!("portal_session={}", cookie));
        }
        let request = builder.body(Body::from(body)).unwrap();
        self.send(request).await
    }

    /// Register an account through the API
    pub async fn signup(&self, username: &str, student_id: &str, email: &str, password: &str) {
        let body = serde_json::json!({
            "username": username,
            "displayName": format!("{} Display", username),
            "studentId": student_id,
            "email": email,
            "password": password,
        });
        let (status, response) = self.post("/signup", &body.to_string()).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", response);
    }

    /// Sign in through the API and return the session token
    pub async fn signin(&self, identifier: &str, password: &str) -> String {
        let body = serde_json::json!({
            "identifier": identifier,
            "password": password,
        });
        let request = Request::builder()
            .method("POST")
            .uri("/signin")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "signin failed");
        extract_session_token(&response).expect("signin response set no session cookie")
    }

    /// Seed the default administrator account
    pub async fn seed_admin(&self) {
        AuthService::ensure_default_admin(&self.state)
            .await
            .expect("Failed to seed admin");
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();
        (status, body_str)
    }
}

/// Pull the session token out of a response's Set-Cookie headers
pub fn extract_session_token(response: &axum::http::Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let rest = cookie.strip_prefix("portal_session=")?;
            let token = rest.split(';').next()?;
            if token.is_empty() {
                None
            } else {
                Some(token.to_string())
            }
        })
}
