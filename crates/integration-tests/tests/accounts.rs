//! Integration tests for signup, login, and profile management.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The server running (cargo run -p mealdrop-server)
//!
//! Run with: cargo test -p mealdrop-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use mealdrop_integration_tests::{base_url, client, signup, unique_phone};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_health() {
    let client = client();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signup_then_login() {
    let client = client();
    let account = signup(&client, "login", false).await;

    let resp = client
        .post(format!("{}/login", base_url()))
        .json(&json!({"email": account.email, "password": account.password}))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse login response");
    assert_eq!(body["status"], "Login success!");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_signup_duplicate_email_conflicts() {
    let client = client();
    let account = signup(&client, "dup", false).await;

    let resp = client
        .post(format!("{}/signup", base_url()))
        .json(&json!({
            "email": account.email,
            "name": "Someone Else",
            "phone_number": unique_phone(),
            "password": "another-password-123",
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_wrong_password_unauthorized() {
    let client = client();
    let account = signup(&client, "wrongpw", false).await;

    let resp = client
        .post(format!("{}/login", base_url()))
        .json(&json!({"email": account.email, "password": "not-the-password"}))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_me_requires_valid_token() {
    let client = client();

    // No token at all
    let resp = client
        .get(format!("{}/me", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage token is still a credential problem, not a server fault
    let resp = client
        .get(format!("{}/me", base_url()))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_me_returns_profile_without_password() {
    let client = client();
    let account = signup(&client, "profile", false).await;

    let resp = client
        .get(format!("{}/me", base_url()))
        .bearer_auth(&account.token)
        .send()
        .await
        .expect("Failed to get profile");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse profile");
    assert_eq!(body["email"], account.email);
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_profile() {
    let client = client();
    let account = signup(&client, "update", false).await;

    let resp = client
        .put(format!("{}/me", base_url()))
        .bearer_auth(&account.token)
        .json(&json!({"name": "Renamed Account"}))
        .send()
        .await
        .expect("Failed to update profile");

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse profile");
    assert_eq!(body["name"], "Renamed Account");
    // Untouched fields survive a partial update
    assert_eq!(body["email"], account.email);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_password_verify_and_change() {
    let client = client();
    let account = signup(&client, "pwchange", false).await;

    // Current password verifies
    let resp = client
        .post(format!("{}/me/password", base_url()))
        .bearer_auth(&account.token)
        .json(&json!({"password": account.password}))
        .send()
        .await
        .expect("Failed to verify password");
    assert_eq!(resp.status(), StatusCode::OK);

    // Wrong password is rejected
    let resp = client
        .post(format!("{}/me/password", base_url()))
        .bearer_auth(&account.token)
        .json(&json!({"password": "definitely-wrong"}))
        .send()
        .await
        .expect("Failed to verify password");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Change it, then login with the new one
    let new_password = "a-brand-new-password-42";
    let resp = client
        .put(format!("{}/me/password", base_url()))
        .bearer_auth(&account.token)
        .json(&json!({"password": new_password}))
        .send()
        .await
        .expect("Failed to change password");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{}/login", base_url()))
        .json(&json!({"email": account.email, "password": new_password}))
        .send()
        .await
        .expect("Failed to login with new password");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_weak_password_rejected() {
    let client = client();

    let resp = client
        .post(format!("{}/signup", base_url()))
        .json(&json!({
            "email": mealdrop_integration_tests::unique_email("weak"),
            "name": "Weak",
            "phone_number": unique_phone(),
            "password": "short",
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
