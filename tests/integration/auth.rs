//! Integration tests for registration, login, profile, and admin account
//! management.

use axum::http::StatusCode;
use serde_json::json;

use reliefhub_database::store::UserStore;

use crate::helpers::{TEST_PASSWORD, TestApp};

#[tokio::test]
async fn test_register_login_me_round_trip() {
    let app = TestApp::new().await;

    let (token, id) = app.register("Ada Lovelace", "ada@example.com", "user").await;

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["name"], "Ada Lovelace");
    assert_eq!(me.body["user"]["role"], "user");
    assert_eq!(me.body["user"]["id"], id.to_string());
    assert!(me.body["user"].get("passwordHash").is_none());

    let fresh_token = app.login("ada@example.com").await;
    let me = app
        .request("GET", "/api/auth/me", None, Some(&fresh_token))
        .await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_requires_a_credential() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-valid-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_without_clobbering_the_original() {
    let app = TestApp::new().await;
    app.register("Original", "taken@example.com", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Imposter",
                "email": "taken@example.com",
                "password": TEST_PASSWORD,
                "role": "volunteer",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // The original account is unchanged and still able to log in.
    let token = app.login("taken@example.com").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.body["user"]["name"], "Original");
}

#[tokio::test]
async fn test_register_validation_failures() {
    let app = TestApp::new().await;

    // Admin role cannot be self-registered.
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Mallory",
                "email": "mallory@example.com",
                "password": TEST_PASSWORD,
                "role": "admin",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Field validation reports a structured error list.
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "B",
                "email": "not-an-email",
                "password": "short",
                "role": "user",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Validation failed");
    let errors = response.body["errors"].as_array().expect("errors array");
    assert!(errors.len() >= 3);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    let (_, id) = app.register("Grace", "grace@example.com", "volunteer").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "grace@example.com", "password": "wrongpassword" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@example.com", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // A deactivated account is refused even with the right password.
    app.users.set_active(id, false).await.unwrap();
    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "grace@example.com", "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Account is deactivated");
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com", "user").await;

    let response = app
        .request(
            "PUT",
            "/api/auth/change-password",
            Some(json!({ "currentPassword": "guess", "newPassword": "newpassword" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            "/api/auth/change-password",
            Some(json!({ "currentPassword": TEST_PASSWORD, "newPassword": "newpassword" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ada@example.com", "password": "newpassword" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_profile_update_keeps_skills_for_volunteers_only() {
    let app = TestApp::new().await;

    let (volunteer_token, _) = app.register("Vol", "vol@example.com", "volunteer").await;
    let response = app
        .request(
            "PUT",
            "/api/auth/profile",
            Some(json!({ "location": "North side", "skills": ["first-aid", "logistics"] })),
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["location"], "North side");
    assert_eq!(response.body["user"]["skills"].as_array().unwrap().len(), 2);

    let (user_token, _) = app.register("Reporter", "rep@example.com", "user").await;
    let response = app
        .request(
            "PUT",
            "/api/auth/profile",
            Some(json!({ "skills": ["should-be-ignored"] })),
            Some(&user_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["user"]["skills"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_user_management() {
    let app = TestApp::new().await;

    let (admin_token, admin_id) = app.create_admin("Root", "root@example.com").await;
    let (user_token, user_id) = app.register("Doomed", "doomed@example.com", "user").await;
    app.register("Vol", "vol@example.com", "volunteer").await;

    // Listing is admin-gated and excludes admin accounts.
    let response = app
        .request("GET", "/api/auth/users", None, Some(&user_token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", "/api/auth/users", None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 2);

    // Admin accounts cannot be deleted.
    let response = app
        .request(
            "DELETE",
            &format!("/api/auth/users/{admin_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Deleting a user invalidates their credential on the next request.
    let response = app
        .request(
            "DELETE",
            &format!("/api/auth/users/{user_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/auth/me", None, Some(&user_token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
