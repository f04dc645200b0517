// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::json;

use super::helpers::{create_test_app, login_lawyer, send};

#[tokio::test]
async fn test_reminder_due_date_is_normalized_to_utc() {
    let app: Router = create_test_app();
    let token: String = login_lawyer(&app).await;

    let (status, reminder) = send(
        &app,
        "POST",
        "/api/reminders",
        Some(&token),
        Some(json!({
            "title": "Court Hearing",
            "dueDate": "2026-04-01T09:30:00+02:00",
            "type": "hearing",
            "priority": "high"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(reminder["dueDate"], "2026-04-01T07:30:00Z");
    assert_eq!(reminder["type"], "hearing");
    assert_eq!(reminder["completed"], false);
}

#[tokio::test]
async fn test_invalid_due_date_is_bad_request() {
    let app: Router = create_test_app();
    let token: String = login_lawyer(&app).await;

    let (status, _body) = send(
        &app,
        "POST",
        "/api/reminders",
        Some(&token),
        Some(json!({ "title": "Someday", "dueDate": "next tuesday" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_completing_reminder_updates_dashboard() {
    let app: Router = create_test_app();
    let token: String = login_lawyer(&app).await;
    let (_, reminder) = send(
        &app,
        "POST",
        "/api/reminders",
        Some(&token),
        Some(json!({ "title": "File motion", "dueDate": "2026-05-01T12:00:00Z" })),
    )
    .await;

    let (status, stats) = send(&app, "GET", "/api/dashboard/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["pendingReminders"], 1);
    assert_eq!(stats["totalCases"], 0);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/reminders/{}", reminder["id"].as_i64().unwrap()),
        Some(&token),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "File motion");

    let (_, stats) = send(&app, "GET", "/api/dashboard/stats", Some(&token), None).await;
    assert_eq!(stats["pendingReminders"], 0);
}
