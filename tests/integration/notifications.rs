//! Integration tests for notification fan-out and the recipient-facing
//! endpoints.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_creation_fans_out_to_every_active_responder() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (v1_token, _) = app.register("V1", "v1@example.com", "volunteer").await;
    let (v2_token, _) = app.register("V2", "v2@example.com", "volunteer").await;
    let (admin_token, _) = app.create_admin("Root", "root@example.com").await;

    let disaster_id = app.create_disaster(&reporter_token, "River flooding").await;
    app.drain_events().await;

    // Exactly one row per volunteer and admin, each referencing the
    // created disaster.
    for token in [&v1_token, &v2_token, &admin_token] {
        let response = app.request("GET", "/api/notifications", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["count"], 1);

        let row = &response.body["notifications"][0];
        assert_eq!(row["kind"], "disaster_alert");
        assert_eq!(row["title"], "New Disaster Reported");
        assert_eq!(
            row["message"],
            "A new flood disaster has been reported: River flooding"
        );
        assert_eq!(row["relatedDisasterId"], disaster_id.to_string());
        assert_eq!(row["isRead"], false);
    }

    // The reporter is not a responder and receives nothing on creation.
    let response = app
        .request("GET", "/api/notifications", None, Some(&reporter_token))
        .await;
    assert_eq!(response.body["count"], 0);
}

#[tokio::test]
async fn test_unread_count_read_flags_and_deletion() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (volunteer_token, _) = app.register("Vol", "vol@example.com", "volunteer").await;

    for i in 0..3 {
        app.create_disaster(&reporter_token, &format!("Incident number {i}"))
            .await;
    }
    app.drain_events().await;

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(&volunteer_token))
        .await;
    assert_eq!(response.body["count"], 3);

    // Mark one read.
    let list = app
        .request("GET", "/api/notifications", None, Some(&volunteer_token))
        .await;
    let first_id = list.body["notifications"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{first_id}/read"),
            None,
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["notification"]["isRead"], true);

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(&volunteer_token))
        .await;
    assert_eq!(response.body["count"], 2);

    // Mark all read.
    let response = app
        .request("PUT", "/api/notifications/mark-all-read", None, Some(&volunteer_token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/notifications/unread-count", None, Some(&volunteer_token))
        .await;
    assert_eq!(response.body["count"], 0);

    // Delete one row.
    let response = app
        .request(
            "DELETE",
            &format!("/api/notifications/{first_id}"),
            None,
            Some(&volunteer_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/notifications", None, Some(&volunteer_token))
        .await;
    assert_eq!(response.body["count"], 2);
}

#[tokio::test]
async fn test_notifications_are_scoped_to_their_recipient() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (volunteer_token, _) = app.register("Vol", "vol@example.com", "volunteer").await;
    let (other_token, _) = app.register("Other", "other@example.com", "user").await;

    app.create_disaster(&reporter_token, "River flooding").await;
    app.drain_events().await;

    let list = app
        .request("GET", "/api/notifications", None, Some(&volunteer_token))
        .await;
    let id = list.body["notifications"][0]["id"].as_str().unwrap().to_string();

    // A different user cannot read or delete someone else's rows.
    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{id}/read"),
            None,
            Some(&other_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "DELETE",
            &format!("/api/notifications/{id}"),
            None,
            Some(&other_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // The row is still there for its owner.
    let list = app
        .request("GET", "/api/notifications", None, Some(&volunteer_token))
        .await;
    assert_eq!(list.body["count"], 1);
}

#[tokio::test]
async fn test_realtime_push_reaches_a_connected_recipient() {
    let app = TestApp::new().await;
    let (reporter_token, _) = app.register("Ada", "ada@example.com", "user").await;
    let (_, volunteer_id) = app.register("Vol", "vol@example.com", "volunteer").await;

    // Simulate a live WebSocket connection for the volunteer.
    let (_conn, mut rx) = app.hub.register(volunteer_id);

    app.create_disaster(&reporter_token, "River flooding").await;
    app.drain_events().await;

    let pushed = rx.recv().await.expect("pushed message");
    let value: serde_json::Value = serde_json::from_str(&pushed).unwrap();
    assert_eq!(value["event"], "notification");
    assert_eq!(value["kind"], "disaster_alert");
    assert_eq!(value["title"], "New Disaster Reported");
}
