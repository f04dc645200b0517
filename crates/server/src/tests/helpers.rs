// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use legalflow_persistence::{NewUser, Persistence};
use serde_json::Value;
use std::sync::Arc;
use time::Duration;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

pub const ADMIN_USERNAME: &str = "admin_user";
pub const LAWYER_USERNAME: &str = "lawyer_one";
pub const TEST_PASSWORD: &str = "correct-horse";

/// Builds state over a fresh in-memory database holding one admin and one
/// lawyer.
pub fn create_test_app_state() -> AppState {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .bootstrap_admin(ADMIN_USERNAME, TEST_PASSWORD)
        .unwrap();
    persistence
        .create_user(&NewUser {
            username: LAWYER_USERNAME.to_string(),
            password: TEST_PASSWORD.to_string(),
            full_name: String::from("Lawyer One"),
            email: Some(String::from("lawyer.one@example.com")),
            phone: None,
            bar_number: Some(String::from("BAR-0001")),
            practice_areas: None,
            role: String::from("Lawyer"),
        })
        .unwrap();

    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        session_lifetime: Duration::days(30),
    }
}

pub fn create_test_app() -> Router {
    build_router(create_test_app_state())
}

/// Sends one request and returns the status with the parsed JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, value)
}

pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

pub async fn login_admin(app: &Router) -> String {
    login(app, ADMIN_USERNAME, TEST_PASSWORD).await
}

pub async fn login_lawyer(app: &Router) -> String {
    login(app, LAWYER_USERNAME, TEST_PASSWORD).await
}

/// Creates a case type as the admin and returns its ID.
pub async fn create_case_type(app: &Router, admin_token: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/case-types",
        Some(admin_token),
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "case type failed: {body}");
    body["id"].as_i64().unwrap()
}
