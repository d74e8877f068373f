//! Integration tests for account endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_signup_then_signin() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;

    let body = json!({
        "identifier": "alice",
        "password": "password123",
    });
    let (status, response) = app.post("/signin", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Sign-in successful");
    assert_eq!(response["redirectUrl"], "/profile");
}

#[tokio::test]
async fn test_signup_duplicate_username() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;

    let body = json!({
        "username": "alice",
        "displayName": "Other Alice",
        "studentId": "99999",
        "email": "other@example.com",
        "password": "password123",
    });
    let (status, response) = app.post("/signup", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Username or email already exists");

    // Store unchanged
    assert_eq!(app.state.users().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;

    let body = json!({
        "username": "bob",
        "displayName": "Bob B",
        "studentId": "99999",
        "email": "alice@example.com",
        "password": "password123",
    });
    let (status, response) = app.post("/signup", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Username or email already exists");
}

#[tokio::test]
async fn test_signup_duplicate_student_id() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;

    let body = json!({
        "username": "bob",
        "displayName": "Bob B",
        "studentId": "12345",
        "email": "bob@example.com",
        "password": "password123",
    });
    let (status, response) = app.post("/signup", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "NIM already registered");
    assert_eq!(app.state.users().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "username": "alice",
        "displayName": "Alice A",
        "studentId": "12345",
        "email": "not-an-email",
        "password": "password123",
    });
    let (status, _) = app.post("/signup", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.state.users().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_signin_failures_are_indistinguishable() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;

    let wrong_password = json!({
        "identifier": "alice",
        "password": "wrong-password",
    });
    let unknown_identifier = json!({
        "identifier": "nobody",
        "password": "password123",
    });

    let (status_a, body_a) = app.post("/signin", &wrong_password.to_string()).await;
    let (status_b, body_b) = app.post("/signin", &unknown_identifier.to_string()).await;

    // Byte-identical status and body
    assert_eq!(status_a, StatusCode::UNAUTHORIZED);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);

    let body: serde_json::Value = serde_json::from_str(&body_a).unwrap();
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_signin_missing_fields() {
    let app = common::TestApp::new().await;

    let body = json!({"identifier": "", "password": ""});
    let (status, response) = app.post("/signin", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("All fields are required"));
}

#[tokio::test]
async fn test_signin_by_each_identifier_kind() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;

    for identifier in ["alice", "alice@example.com", "12345"] {
        let token = app.signin(identifier, "password123").await;
        let (status, _) = app.get_with_cookie("/profile-data", Some(&token)).await;
        assert_eq!(status, StatusCode::OK, "identifier {} failed", identifier);
    }
}

#[tokio::test]
async fn test_logout_kills_session() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;
    let token = app.signin("alice", "password123").await;

    // Session is live
    let (status, _) = app.get_with_cookie("/profile-data", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    // Logout redirects home
    let (status, _) = app.get_with_cookie("/logout", Some(&token)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    // The dead token no longer authenticates
    let (status, response) = app.get_with_cookie("/profile-data", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Not authenticated");
}

#[tokio::test]
async fn test_reset_password_roundtrip() {
    let app = common::TestApp::new().await;

    app.signup("alice", "12345", "alice@example.com", "password123")
        .await;

    let body = json!({
        "email": "alice@example.com",
        "newPassword": "rotated-password",
    });
    let (status, response) = app.post("/reset-password", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "Password reset successful");

    // Old password rejected, new one accepted
    let old = json!({"identifier": "alice", "password": "password123"});
    let (status, _) = app.post("/signin", &old.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    app.signin("alice", "rotated-password").await;
}

#[tokio::test]
async fn test_reset_password_unknown_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": "nobody@example.com",
        "newPassword": "whatever-password",
    });
    let (status, response) = app.post("/reset-password", &body.to_string()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "User not found");
}

#[tokio::test]
async fn test_seeded_admin_can_sign_in() {
    let app = common::TestApp::new().await;
    app.seed_admin().await;

    let admin = &app.state.config().admin;
    let body = json!({
        "identifier": admin.username,
        "password": admin.password,
    });
    let (status, _) = app.post("/signin", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_full_scenario_alice() {
    let app = common::TestApp::new().await;

    // Register alice
    let body = json!({
        "username": "alice",
        "displayName": "Alice A",
        "studentId": "123",
        "email": "a@x.com",
        "password": "password-p1",
    });
    let (status, response) = app.post("/signup", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);
    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["message"], "User registered successfully");

    // Sign in by email
    let token = app.signin("a@x.com", "password-p1").await;

    // Profile is the exact snapshot with the default photo
    let (status, profile) = app.get_with_cookie("/profile-data", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let profile: serde_json::Value = serde_json::from_str(&profile).unwrap();
    assert_eq!(
        profile,
        json!({
            "username": "alice",
            "displayName": "Alice A",
            "studentId": "123",
            "email": "a@x.com",
            "photoRef": "default-avatar.png",
        })
    );
}
