//! Integration tests for the catalog: restaurants, foods, locations, and
//! feedback.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The server running (cargo run -p mealdrop-server)
//!
//! Run with: cargo test -p mealdrop-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use mealdrop_integration_tests::{base_url, client, create_location, signup, unique_email};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_restaurant_list_is_public() {
    let client = client();

    let resp = client
        .get(format!("{}/restaurants", base_url()))
        .send()
        .await
        .expect("Failed to list restaurants");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse restaurants");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_restaurant_mutations_require_admin() {
    let client = client();
    let user = signup(&client, "resto-user", false).await;

    let resp = client
        .post(format!("{}/restaurants", base_url()))
        .bearer_auth(&user.token)
        .json(&json!({"name": "Unauthorized Bistro"}))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_restaurant_crud() {
    let client = client();
    let admin = signup(&client, "resto-admin", true).await;

    // Create
    let name = format!("Bistro {}", Uuid::new_v4());
    let resp = client
        .post(format!("{}/restaurants", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({"name": name, "about": "Neighborhood joint"}))
        .send()
        .await
        .expect("Failed to create restaurant");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("Failed to parse restaurant");
    let id = body["id"].as_i64().expect("restaurant missing id");
    assert_eq!(body["name"], name);

    // Partial update leaves other fields alone
    let resp = client
        .put(format!("{}/restaurants/{id}", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({"location": "Main Street 1"}))
        .send()
        .await
        .expect("Failed to update restaurant");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse restaurant");
    assert_eq!(body["name"], name);
    assert_eq!(body["location"], "Main Street 1");

    // Delete
    let resp = client
        .delete(format!("{}/restaurants/{id}", base_url()))
        .bearer_auth(&admin.token)
        .send()
        .await
        .expect("Failed to delete restaurant");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Gone now
    let resp = client
        .delete(format!("{}/restaurants/{id}", base_url()))
        .bearer_auth(&admin.token)
        .send()
        .await
        .expect("Failed to send second delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_foods_by_restaurant() {
    let client = client();
    let admin = signup(&client, "food-admin", true).await;

    let resp = client
        .post(format!("{}/restaurants", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({"name": format!("Pizzeria {}", Uuid::new_v4())}))
        .send()
        .await
        .expect("Failed to create restaurant");
    let body: Value = resp.json().await.expect("Failed to parse restaurant");
    let restaurant_id = body["id"].as_i64().expect("restaurant missing id");

    let resp = client
        .post(format!("{}/foods", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({
            "name": "Quattro Formaggi",
            "restaurant_id": restaurant_id,
            "price": "12.00",
        }))
        .send()
        .await
        .expect("Failed to create food");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/restaurants/{restaurant_id}/foods", base_url()))
        .send()
        .await
        .expect("Failed to list foods");
    assert_eq!(resp.status(), StatusCode::OK);

    let foods: Value = resp.json().await.expect("Failed to parse foods");
    let foods = foods.as_array().expect("foods response is not an array");
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0]["name"], "Quattro Formaggi");
    assert_eq!(foods[0]["price"], "12.00");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_locations_are_scoped_to_owner() {
    let client = client();
    let alice = signup(&client, "loc-alice", false).await;
    let bob = signup(&client, "loc-bob", false).await;

    let location_id = create_location(&client, &alice).await;

    let resp = client
        .get(format!("{}/locations/mine", base_url()))
        .bearer_auth(&alice.token)
        .send()
        .await
        .expect("Failed to list own locations");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse locations");
    let ids: Vec<i64> = body
        .as_array()
        .expect("locations response is not an array")
        .iter()
        .filter_map(|l| l["id"].as_i64())
        .collect();
    assert!(ids.contains(&location_id));

    // Bob does not see Alice's location
    let resp = client
        .get(format!("{}/locations/mine", base_url()))
        .bearer_auth(&bob.token)
        .send()
        .await
        .expect("Failed to list own locations");
    let body: Value = resp.json().await.expect("Failed to parse locations");
    let ids: Vec<i64> = body
        .as_array()
        .expect("locations response is not an array")
        .iter()
        .filter_map(|l| l["id"].as_i64())
        .collect();
    assert!(!ids.contains(&location_id));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_location_update_and_delete_own() {
    let client = client();
    let alice = signup(&client, "locmut-alice", false).await;
    let bob = signup(&client, "locmut-bob", false).await;

    let location_id = create_location(&client, &alice).await;

    // Owner can rename it
    let resp = client
        .put(format!("{}/locations/mine/{location_id}", base_url()))
        .bearer_auth(&alice.token)
        .json(&json!({"name": "Office"}))
        .send()
        .await
        .expect("Failed to update location");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse location");
    assert_eq!(body["name"], "Office");
    // Untouched fields survive a partial update
    assert_eq!(body["latitude"], "52.3676");

    // Someone else's location looks like it doesn't exist
    let resp = client
        .put(format!("{}/locations/mine/{location_id}", base_url()))
        .bearer_auth(&bob.token)
        .json(&json!({"name": "Hijacked"}))
        .send()
        .await
        .expect("Failed to send update request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{}/locations/mine/{location_id}", base_url()))
        .bearer_auth(&bob.token)
        .send()
        .await
        .expect("Failed to send delete request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Owner can delete it
    let resp = client
        .delete(format!("{}/locations/mine/{location_id}", base_url()))
        .bearer_auth(&alice.token)
        .send()
        .await
        .expect("Failed to delete location");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/locations/mine", base_url()))
        .bearer_auth(&alice.token)
        .send()
        .await
        .expect("Failed to list own locations");
    let body: Value = resp.json().await.expect("Failed to parse locations");
    let gone = body
        .as_array()
        .expect("locations response is not an array")
        .iter()
        .all(|l| l["id"].as_i64() != Some(location_id));
    assert!(gone);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_food_search_by_substring() {
    let client = client();
    let admin = signup(&client, "search-admin", true).await;

    let resp = client
        .post(format!("{}/restaurants", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({"name": format!("Diner {}", Uuid::new_v4())}))
        .send()
        .await
        .expect("Failed to create restaurant");
    let body: Value = resp.json().await.expect("Failed to parse restaurant");
    let restaurant_id = body["id"].as_i64().expect("restaurant missing id");

    // Name unique to this run so existing catalog rows can't interfere
    let marker = Uuid::new_v4().simple().to_string();
    let name = format!("Stroopwafel {marker}");
    let resp = client
        .post(format!("{}/foods", base_url()))
        .bearer_auth(&admin.token)
        .json(&json!({
            "name": name,
            "restaurant_id": restaurant_id,
            "price": "3.25",
        }))
        .send()
        .await
        .expect("Failed to create food");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Case-insensitive substring match finds it
    let needle = marker.to_uppercase();
    let resp = client
        .get(format!("{}/foods/search/{needle}", base_url()))
        .send()
        .await
        .expect("Failed to search foods");
    assert_eq!(resp.status(), StatusCode::OK);
    let foods: Value = resp.json().await.expect("Failed to parse foods");
    let foods = foods.as_array().expect("foods response is not an array");
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0]["name"], name);

    // A term that matches nothing returns an empty list, not an error
    let resp = client
        .get(format!("{}/foods/search/{}", base_url(), Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to search foods");
    assert_eq!(resp.status(), StatusCode::OK);
    let foods: Value = resp.json().await.expect("Failed to parse foods");
    assert_eq!(foods.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_location_list_all_requires_admin() {
    let client = client();
    let user = signup(&client, "loc-gate", false).await;

    let resp = client
        .get(format!("{}/locations", base_url()))
        .bearer_auth(&user.token)
        .send()
        .await
        .expect("Failed to send list request");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_feedback_flow() {
    let client = client();
    let admin = signup(&client, "fb-admin", true).await;

    let email = unique_email("feedback");
    let resp = client
        .post(format!("{}/feedback", base_url()))
        .json(&json!({"email": email, "message": "Loved the pizza"}))
        .send()
        .await
        .expect("Failed to leave feedback");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Malformed email is rejected up front
    let resp = client
        .post(format!("{}/feedback", base_url()))
        .json(&json!({"email": "not-an-email", "message": "hi"}))
        .send()
        .await
        .expect("Failed to send feedback request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Admin sees it in the list
    let resp = client
        .get(format!("{}/feedback", base_url()))
        .bearer_auth(&admin.token)
        .send()
        .await
        .expect("Failed to list feedback");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse feedback");
    let found = body
        .as_array()
        .expect("feedback response is not an array")
        .iter()
        .any(|f| f["email"] == email.as_str());
    assert!(found);
}
