//! API integration tests
//!
//! These run against a live server with a clean database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique_phone() -> String {
    // 9 + 9 digits derived from the current time, always a valid mobile number
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("9{:09}", nanos % 1_000_000_000)
}

/// Register a fresh farmer and return (token, phone)
async fn register_farmer(client: &Client, name: &str) -> (String, String) {
    let phone = unique_phone();
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": name,
            "phone": phone,
            "password": "secret123",
            "village": "Wadgaon",
            "panchayat": "Wadgaon GP",
            "district": "Pune",
            "state": "Maharashtra",
            "location": { "longitude": 73.8567, "latitude": 18.5204 }
        }))
        .send()
        .await
        .expect("Failed to send register request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse register response");
    let token = body["token"].as_str().expect("No token in response").to_string();
    (token, phone)
}

/// Create a tractor listing for the given owner and return its id
async fn create_tractor(client: &Client, token: &str) -> String {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Mahindra 575 DI",
            "category": "tractor",
            "brand": "Mahindra",
            "price_per_hour": 150,
            "price_per_day": 1000,
            "location": { "longitude": 73.8567, "latitude": 18.5204 }
        }))
        .send()
        .await
        .expect("Failed to send create equipment request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse equipment response");
    body["id"].as_str().expect("No equipment ID").to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_register_and_login() {
    let client = Client::new();
    let (_, phone) = register_farmer(&client, "Asha Patil").await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "phone": phone,
            "password": "secret123"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["farmer"]["phone"], phone.as_str());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();
    let (_, phone) = register_farmer(&client, "Asha Patil").await;

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "phone": phone,
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_register_rejects_bad_phone() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "name": "Asha Patil",
            "phone": "12345",
            "password": "secret123",
            "village": "Wadgaon",
            "panchayat": "Wadgaon GP",
            "district": "Pune",
            "state": "Maharashtra"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/farmers/me", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_equipment_search_is_public() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["equipment"].is_array());
    assert!(body["count"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_create_and_search_equipment() {
    let client = Client::new();
    let (token, _) = register_farmer(&client, "Ram Deshmukh").await;
    let equipment_id = create_tractor(&client, &token).await;

    // Radius search around the listing's location
    let response = client
        .get(format!(
            "{}/equipment?lat=18.5204&lng=73.8567&radius=5&type=tractor",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let found = body["equipment"]
        .as_array()
        .expect("equipment not an array")
        .iter()
        .any(|e| e["id"] == equipment_id.as_str());
    assert!(found);
}

#[tokio::test]
#[ignore]
async fn test_booking_lifecycle() {
    let client = Client::new();
    let (owner_token, _) = register_farmer(&client, "Ram Deshmukh").await;
    let (renter_token, _) = register_farmer(&client, "Asha Patil").await;
    let equipment_id = create_tractor(&client, &owner_token).await;

    // 25 hours with a daily rate of 1000: 2 billable days, total 2000
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", renter_token))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": "2026-09-01T06:00:00Z",
            "end_date": "2026-09-02T07:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse booking response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();
    assert_eq!(body["booking"]["status"], "pending");
    assert_eq!(body["booking"]["duration_hours"], 25);
    assert_eq!(body["booking"]["duration_days"], 2);
    assert_eq!(body["booking"]["total_price"], "2000");

    // Equipment is now booked; a second renter must be turned away
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", renter_token))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": "2026-09-05T06:00:00Z",
            "end_date": "2026-09-05T10:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Renter cannot confirm
    let response = client
        .patch(format!("{}/bookings/{}/confirm", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", renter_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Owner confirms
    let response = client
        .patch(format!("{}/bookings/{}/confirm", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "confirmed");

    // Confirm is not repeatable
    let response = client
        .patch(format!("{}/bookings/{}/confirm", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Renter completes; the equipment is released
    let response = client
        .patch(format!("{}/bookings/{}/complete", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", renter_token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "completed");

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["availability_status"], "available");
    assert!(body["current_booking_id"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_concurrent_bookings_exactly_one_wins() {
    let client = Client::new();
    let (owner_token, _) = register_farmer(&client, "Ram Deshmukh").await;
    let (renter_a, _) = register_farmer(&client, "Asha Patil").await;
    let (renter_b, _) = register_farmer(&client, "Vikram Rao").await;
    let equipment_id = create_tractor(&client, &owner_token).await;

    let book = |token: String| {
        let client = client.clone();
        let equipment_id = equipment_id.clone();
        async move {
            client
                .post(format!("{}/bookings", BASE_URL))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({
                    "equipment_id": equipment_id,
                    "start_date": "2026-09-01T06:00:00Z",
                    "end_date": "2026-09-01T10:00:00Z"
                }))
                .send()
                .await
                .expect("Failed to send booking request")
                .status()
        }
    };

    // Fire both creates at once; the conditional equipment update decides
    let (status_a, status_b) = tokio::join!(book(renter_a), book(renter_b));

    let statuses = [status_a.as_u16(), status_b.as_u16()];
    assert!(
        statuses.contains(&201) && statuses.contains(&400),
        "expected one 201 and one 400, got {:?}",
        statuses
    );

    // The winner holds the equipment
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["availability_status"], "booked");
    assert!(body["current_booking_id"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_delete_guard_while_booked() {
    let client = Client::new();
    let (owner_token, _) = register_farmer(&client, "Ram Deshmukh").await;
    let (renter_token, _) = register_farmer(&client, "Asha Patil").await;
    let equipment_id = create_tractor(&client, &owner_token).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", renter_token))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": "2026-09-01T06:00:00Z",
            "end_date": "2026-09-01T10:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();

    // Booked equipment cannot be deleted, even by its owner
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Once released it can
    let response = client
        .patch(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", renter_token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", owner_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_public_farmer_profile() {
    let client = Client::new();
    let (token, _) = register_farmer(&client, "Ram Deshmukh").await;
    create_tractor(&client, &token).await;

    let response = client
        .get(format!("{}/farmers/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let me: Value = response.json().await.expect("Failed to parse response");
    let farmer_id = me["id"].as_str().expect("No farmer ID");

    // No auth header: the profile is public
    let response = client
        .get(format!("{}/farmers/{}", BASE_URL, farmer_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["farmer"]["name"], "Ram Deshmukh");
    assert_eq!(body["farmer"]["is_equipment_owner"], true);
    assert!(body["farmer"].get("phone").is_none());
    assert!(body["farmer"].get("password_hash").is_none());
    assert_eq!(body["stats"]["equipment_count"], 1);
    assert_eq!(body["stats"]["completed_bookings"], 0);
}

#[tokio::test]
#[ignore]
async fn test_self_booking_rejected() {
    let client = Client::new();
    let (token, _) = register_farmer(&client, "Ram Deshmukh").await;
    let equipment_id = create_tractor(&client, &token).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": "2026-09-01T06:00:00Z",
            "end_date": "2026-09-01T10:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_cancel_releases_equipment() {
    let client = Client::new();
    let (owner_token, _) = register_farmer(&client, "Ram Deshmukh").await;
    let (renter_token, _) = register_farmer(&client, "Asha Patil").await;
    let equipment_id = create_tractor(&client, &owner_token).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", renter_token))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": "2026-09-01T06:00:00Z",
            "end_date": "2026-09-01T10:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();

    let response = client
        .patch(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", renter_token))
        .json(&json!({ "reason": "Rain forecast" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["booking"]["status"], "cancelled");
    assert_eq!(body["booking"]["cancellation_reason"], "Rain forecast");

    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["availability_status"], "available");
}

#[tokio::test]
#[ignore]
async fn test_booking_hidden_from_strangers() {
    let client = Client::new();
    let (owner_token, _) = register_farmer(&client, "Ram Deshmukh").await;
    let (renter_token, _) = register_farmer(&client, "Asha Patil").await;
    let (stranger_token, _) = register_farmer(&client, "Vikram Rao").await;
    let equipment_id = create_tractor(&client, &owner_token).await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", renter_token))
        .json(&json!({
            "equipment_id": equipment_id,
            "start_date": "2026-09-01T06:00:00Z",
            "end_date": "2026-09-01T10:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["booking"]["id"].as_str().expect("No booking ID").to_string();

    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", stranger_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_dashboard() {
    let client = Client::new();
    let (token, _) = register_farmer(&client, "Ram Deshmukh").await;
    create_tractor(&client, &token).await;

    let response = client
        .get(format!("{}/farmers/me/dashboard", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["my_equipment"], 1);
    assert_eq!(body["available_equipment"], 1);
    assert_eq!(body["pending_bookings"], 0);
}

#[tokio::test]
#[ignore]
async fn test_analytics_overview() {
    let client = Client::new();

    let response = client
        .get(format!("{}/analytics/overview", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["overview"]["total_farmers"].is_number());
    assert!(body["overview"]["total_equipment"].is_number());
    assert!(body["equipment_by_category"].is_array());
}
