// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::json;

use super::helpers::{
    ADMIN_USERNAME, LAWYER_USERNAME, TEST_PASSWORD, create_test_app, login, login_admin,
    login_lawyer, send,
};

#[tokio::test]
async fn test_login_returns_token_and_camel_case_user() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": "Admin_User", "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert!(body["expiresAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);
    assert_eq!(body["user"]["fullName"], "Administrator");
    assert!(body["user"]["lastLoginAt"].is_string());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app: Router = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": ADMIN_USERNAME, "password": "wrong" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/api/cases", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Missing Authorization header")
    );
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let app: Router = create_test_app();

    let (status, _body) = send(&app, "GET", "/api/auth/me", Some("not-a-token"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_session_user() {
    let app: Router = create_test_app();
    let token: String = login_lawyer(&app).await;

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], LAWYER_USERNAME);
    assert_eq!(body["user"]["barNumber"], "BAR-0001");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app: Router = create_test_app();
    let token: String = login_admin(&app).await;

    let (status, _body) = send(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_only_admin_can_create_users() {
    let app: Router = create_test_app();
    let lawyer: String = login_lawyer(&app).await;
    let admin: String = login_admin(&app).await;

    let (status, _body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&lawyer),
        Some(json!({ "username": "intruder", "password": "secret99" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&admin),
        Some(json!({ "username": "new_lawyer", "password": "secret99", "fullName": "New Lawyer" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "Lawyer");

    let new_token: String = login(&app, "new_lawyer", "secret99").await;
    assert!(!new_token.is_empty());
}

#[tokio::test]
async fn test_password_change_requires_current_password() {
    let app: Router = create_test_app();
    let token: String = login_lawyer(&app).await;
    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    let uri: String = format!("/api/user/{}", me["user"]["id"].as_i64().unwrap());

    let (status, _body) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "password": "brand-new-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _body) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "password": "brand-new-pass", "currentPassword": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The session that made the change survives it.
    let (status, _body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    login(&app, LAWYER_USERNAME, "brand-new-pass").await;
}

#[tokio::test]
async fn test_last_admin_cannot_be_deleted() {
    let app: Router = create_test_app();
    let token: String = login_admin(&app).await;
    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    let uri: String = format!("/api/users/{}", me["user"]["id"].as_i64().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], true);
}
