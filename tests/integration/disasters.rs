//! Integration tests for the disaster lifecycle: creation, visibility,
//! status transitions, edits, and deletion.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, disaster_payload};

#[tokio::test]
async fn test_create_and_fetch_round_trip() {
    let app = TestApp::new().await;
    let (token, reporter_id) = app.register("Ada", "ada@example.com", "user").await;

    let response = app
        .request(
            "POST",
            "/api/disasters",
            Some(disaster_payload("River flooding downtown")),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let created = &response.body["disaster"];
    assert_eq!(created["status"], "pending");
    assert_eq!(created["reportedBy"], reporter_id.to_string());
    assert!(created["assignedTo"].is_null());

    let id = created["id"].as_str().unwrap();
    let fetched = app
        .request("GET", &format!("/api/disasters/{id}"), None, Some(&token))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);

    let disaster = &fetched.body["disaster"];
    assert_eq!(disaster["title"], "River flooding downtown");
    assert_eq!(
        disaster["description"],
        "Water level rising fast near the old bridge"
    );
    assert_eq!(disaster["type"], "flood");
    assert_eq!(disaster["severity"], "high");
    assert_eq!(disaster["address"], "12 Bridge St");
    assert_eq!(disaster["latitude"], 48.2);
    assert_eq!(disaster["longitude"], 16.37);
}

#[tokio::test]
async fn test_create_validation_runs_before_persistence() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com", "user").await;

    let mut payload = disaster_payload("ok");
    payload["title"] = json!("tiny"); // under the 5-character minimum
    payload["location"]["coordinates"]["lat"] = json!(123.0);

    let response = app
        .request("POST", "/api/disasters", Some(payload), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Validation failed");

    let fields: Vec<&str> = response.body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"location.coordinates.lat"));

    // Nothing was persisted.
    let list = app.request("GET", "/api/disasters", None, Some(&token)).await;
    assert_eq!(list.body["total"], 0);
}

#[tokio::test]
async fn test_volunteer_acceptance_assigns_and_notifies_reporter() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (volunteer_token, volunteer_id) =
        app.register("Vol", "vol@example.com", "volunteer").await;

    let disaster_id = app
        .create_disaster(&reporter_token, "Severe flooding on 5th")
        .await;
    app.drain_events().await;

    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}/status"),
            Some(json!({ "status": "accepted" })),
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["disaster"]["status"], "accepted");
    assert_eq!(
        response.body["disaster"]["assignedTo"],
        volunteer_id.to_string()
    );
    app.drain_events().await;

    // The reporter received a status_update row referencing the disaster.
    let notifications = app
        .request("GET", "/api/notifications", None, Some(&reporter_token))
        .await;
    let rows = notifications.body["notifications"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["kind"], "status_update");
    assert_eq!(rows[0]["relatedDisasterId"], disaster_id.to_string());
    assert_eq!(
        rows[0]["message"],
        "Your disaster \"Severe flooding on 5th\" status has been updated to accepted"
    );
}

#[tokio::test]
async fn test_racing_acceptance_loses_with_conflict() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (first_token, first_id) = app.register("V1", "v1@example.com", "volunteer").await;
    let (second_token, _) = app.register("V2", "v2@example.com", "volunteer").await;

    let disaster_id = app.create_disaster(&reporter_token, "Warehouse fire").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}/status"),
            Some(json!({ "status": "accepted" })),
            Some(&first_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}/status"),
            Some(json!({ "status": "accepted" })),
            Some(&second_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // The first assignment stands.
    let fetched = app
        .request(
            "GET",
            &format!("/api/disasters/{disaster_id}"),
            None,
            Some(&first_token),
        )
        .await;
    assert_eq!(fetched.body["disaster"]["assignedTo"], first_id.to_string());
}

#[tokio::test]
async fn test_accepted_state_is_terminal_for_status_updates() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (volunteer_token, _) = app.register("Vol", "vol@example.com", "volunteer").await;

    let disaster_id = app.create_disaster(&reporter_token, "Warehouse fire").await;

    let accept = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}/status"),
            Some(json!({ "status": "accepted" })),
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(accept.status, StatusCode::OK);

    let resolve = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}/status"),
            Some(json!({ "status": "resolved" })),
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(resolve.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_status_update_appends_note_in_order() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (volunteer_token, volunteer_id) =
        app.register("Vol", "vol@example.com", "volunteer").await;

    let disaster_id = app.create_disaster(&reporter_token, "Warehouse fire").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}/status"),
            Some(json!({ "status": "declined", "notes": "Duplicate of an earlier report" })),
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let notes = response.body["disaster"]["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["text"], "Duplicate of an earlier report");
    assert_eq!(notes[0]["authorId"], volunteer_id.to_string());
}

#[tokio::test]
async fn test_user_cannot_touch_a_foreign_disaster() {
    let app = TestApp::new().await;
    let (owner_token, _) = app.register("Owner", "owner@example.com", "user").await;
    let (other_token, _) = app.register("Other", "other@example.com", "user").await;

    let disaster_id = app.create_disaster(&owner_token, "Warehouse fire").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}/status"),
            Some(json!({ "status": "resolved" })),
            Some(&other_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}"),
            Some(json!({ "title": "Hijacked title" })),
            Some(&other_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The record is unchanged.
    let fetched = app
        .request(
            "GET",
            &format!("/api/disasters/{disaster_id}"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(fetched.body["disaster"]["status"], "pending");
    assert_eq!(fetched.body["disaster"]["title"], "Warehouse fire");
}

#[tokio::test]
async fn test_listing_visibility_per_role() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (other_user_token, _) = app.register("Bob", "bob@example.com", "user").await;
    let (v1_token, _) = app.register("V1", "v1@example.com", "volunteer").await;
    let (v2_token, _) = app.register("V2", "v2@example.com", "volunteer").await;
    let (admin_token, _) = app.create_admin("Root", "root@example.com").await;

    let d1 = app.create_disaster(&reporter_token, "First incident").await;
    app.create_disaster(&reporter_token, "Second incident").await;

    // V1 accepts d1; it leaves the pending pool.
    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{d1}/status"),
            Some(json!({ "status": "accepted" })),
            Some(&v1_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The reporter sees both of their own records.
    let list = app
        .request("GET", "/api/disasters", None, Some(&reporter_token))
        .await;
    assert_eq!(list.body["total"], 2);

    // An unrelated reporter sees nothing.
    let list = app
        .request("GET", "/api/disasters", None, Some(&other_user_token))
        .await;
    assert_eq!(list.body["total"], 0);

    // The accepting volunteer sees the pool plus their assignment.
    let list = app.request("GET", "/api/disasters", None, Some(&v1_token)).await;
    assert_eq!(list.body["total"], 2);

    // Another volunteer sees only the remaining pool.
    let list = app.request("GET", "/api/disasters", None, Some(&v2_token)).await;
    assert_eq!(list.body["total"], 1);

    // Admins see everything; caller filters compose conjunctively.
    let list = app
        .request("GET", "/api/disasters", None, Some(&admin_token))
        .await;
    assert_eq!(list.body["total"], 2);

    let list = app
        .request(
            "GET",
            "/api/disasters?status=accepted",
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(list.body["total"], 1);

    // A single foreign record is reported as not found, not forbidden.
    let fetched = app
        .request(
            "GET",
            &format!("/api/disasters/{d1}"),
            None,
            Some(&other_user_token),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_details_update_is_a_partial_merge() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com", "user").await;
    let disaster_id = app.create_disaster(&token, "Original title here").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/disasters/{disaster_id}"),
            Some(json!({ "severity": "critical" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["disaster"]["severity"], "critical");
    assert_eq!(response.body["disaster"]["title"], "Original title here");
    // Status is not an editable detail.
    assert_eq!(response.body["disaster"]["status"], "pending");
}

#[tokio::test]
async fn test_delete_is_admin_only_and_cascades_notifications() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (volunteer_token, _) = app.register("Vol", "vol@example.com", "volunteer").await;
    let (admin_token, _) = app.create_admin("Root", "root@example.com").await;

    let disaster_id = app.create_disaster(&reporter_token, "Warehouse fire").await;
    app.drain_events().await;

    // The creation fan-out reached the volunteer.
    let before = app
        .request("GET", "/api/notifications", None, Some(&volunteer_token))
        .await;
    assert_eq!(before.body["count"], 1);

    let response = app
        .request(
            "DELETE",
            &format!("/api/disasters/{disaster_id}"),
            None,
            Some(&reporter_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/api/disasters/{disaster_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let fetched = app
        .request(
            "GET",
            &format!("/api/disasters/{disaster_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    // The disaster's notifications were removed with it.
    let after = app
        .request("GET", "/api/notifications", None, Some(&volunteer_token))
        .await;
    assert_eq!(after.body["count"], 0);
}

#[tokio::test]
async fn test_nearby_uses_the_bounding_box() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com", "user").await;

    let mut near = disaster_payload("Close incident");
    near["location"]["coordinates"] = json!({ "lat": 10.0, "lng": 10.0 });
    let response = app
        .request("POST", "/api/disasters", Some(near), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let mut far = disaster_payload("Distant incident");
    far["location"]["coordinates"] = json!({ "lat": 11.0, "lng": 11.0 });
    let response = app
        .request("POST", "/api/disasters", Some(far), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    // 10 km default radius is ~0.09 degrees; only the close incident hits.
    let list = app
        .request(
            "GET",
            "/api/disasters/nearby?lat=10.0&lng=10.0",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["count"], 1);
    assert_eq!(list.body["disasters"][0]["title"], "Close incident");

    // Out-of-range coordinates are a validation failure.
    let list = app
        .request(
            "GET",
            "/api/disasters/nearby?lat=100.0&lng=10.0",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(list.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pagination_defaults_and_limits() {
    let app = TestApp::new().await;
    let (token, _) = app.register("Ada", "ada@example.com", "user").await;

    for i in 0..12 {
        app.create_disaster(&token, &format!("Incident number {i}")).await;
    }

    let list = app.request("GET", "/api/disasters", None, Some(&token)).await;
    assert_eq!(list.body["total"], 12);
    assert_eq!(list.body["count"], 10); // default page size
    assert_eq!(list.body["pages"], 2);

    let list = app
        .request("GET", "/api/disasters?page=2&limit=10", None, Some(&token))
        .await;
    assert_eq!(list.body["count"], 2);
    assert_eq!(list.body["page"], 2);
}
