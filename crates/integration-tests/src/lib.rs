//! Integration tests for Mealdrop.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and the server
//! docker compose up -d postgres
//! cargo run -p mealdrop-server
//!
//! # Run integration tests
//! cargo test -p mealdrop-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP. The base URL is taken from
//! `MEALDROP_BASE_URL` and defaults to `http://localhost:3000`.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the Mealdrop API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("MEALDROP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client for tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate an email address unique to this test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

/// Generate a phone number unique to this test run.
#[must_use]
pub fn unique_phone() -> String {
    let n = u64::from(Uuid::new_v4().as_fields().0);
    format!("+1555{n:07}")
}

/// A signed-up test account with its bearer token.
pub struct TestAccount {
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Register a fresh account and return its credentials and token.
///
/// # Panics
///
/// Panics if the signup request fails or returns an unexpected body.
pub async fn signup(client: &Client, prefix: &str, admin: bool) -> TestAccount {
    let email = unique_email(prefix);
    let password = format!("pw-{}", Uuid::new_v4());

    let resp = client
        .post(format!("{}/signup", base_url()))
        .json(&json!({
            "email": email,
            "name": "Test Account",
            "phone_number": unique_phone(),
            "password": password,
            "admin": admin,
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse signup response");
    let token = body["token"]
        .as_str()
        .expect("signup response missing token")
        .to_string();

    TestAccount {
        email,
        password,
        token,
    }
}

/// Save a delivery location for the account and return its id.
///
/// # Panics
///
/// Panics if the request fails or returns an unexpected body.
pub async fn create_location(client: &Client, account: &TestAccount) -> i64 {
    let resp = client
        .post(format!("{}/locations", base_url()))
        .bearer_auth(&account.token)
        .json(&json!({
            "name": "Home",
            "latitude": "52.3676",
            "longitude": "4.9041",
        }))
        .send()
        .await
        .expect("Failed to create location");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let body: Value = resp
        .json()
        .await
        .expect("Failed to parse location response");
    body["id"].as_i64().expect("location response missing id")
}

/// Create a restaurant and a food as the given admin, returning the food id.
///
/// # Panics
///
/// Panics if either request fails or returns an unexpected body.
pub async fn create_food(client: &Client, admin: &TestAccount) -> i64 {
    let resp = client
        .post(format!("{}/restaurants", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({"name": format!("Resto {}", Uuid::new_v4())}))
        .send()
        .await
        .expect("Failed to create restaurant");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let body: Value = resp
        .json()
        .await
        .expect("Failed to parse restaurant response");
    let restaurant_id = body["id"].as_i64().expect("restaurant response missing id");

    let resp = client
        .post(format!("{}/foods", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({
            "name": "Margherita",
            "restaurant_id": restaurant_id,
            "price": "9.50",
        }))
        .send()
        .await
        .expect("Failed to create food");

    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse food response");
    body["id"].as_i64().expect("food response missing id")
}
