// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for login, session validation and logout.

use time::Duration;

use crate::handlers::{login, logout, me};
use crate::request_response::LoginRequest;
use crate::tests::helpers::{
    TEST_PASSWORD, create_test_admin, create_test_lawyer, create_test_persistence,
};
use crate::{ApiError, AuthError, AuthenticationService, Role};

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_login_returns_token_and_user() {
    let mut persistence = create_test_persistence();
    create_test_lawyer(&mut persistence, "jsmith");

    let response = login(
        &mut persistence,
        &login_request("jsmith", TEST_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_LIFETIME,
    )
    .unwrap();

    assert!(response.token.starts_with("session_"));
    assert!(response.expires_at.ends_with('Z'));
    assert_eq!(response.user.username, "jsmith");
    assert_eq!(response.user.role, "Lawyer");
    assert!(response.user.last_login_at.is_some());
}

#[test]
fn test_login_username_is_case_insensitive() {
    let mut persistence = create_test_persistence();
    create_test_lawyer(&mut persistence, "jsmith");

    let result = login(
        &mut persistence,
        &login_request("  JSmith ", TEST_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_LIFETIME,
    );

    assert!(result.is_ok());
}

#[test]
fn test_login_with_wrong_password_fails() {
    let mut persistence = create_test_persistence();
    create_test_lawyer(&mut persistence, "jsmith");

    let result = login(
        &mut persistence,
        &login_request("jsmith", "not-the-password"),
        AuthenticationService::DEFAULT_SESSION_LIFETIME,
    );

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { ref reason }) if reason == "Invalid credentials"
    ));
}

#[test]
fn test_login_with_unknown_user_fails_like_wrong_password() {
    let mut persistence = create_test_persistence();

    let result = login(
        &mut persistence,
        &login_request("nobody", TEST_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_LIFETIME,
    );

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { ref reason }) if reason == "Invalid credentials"
    ));
}

#[test]
fn test_session_token_authenticates_until_logout() {
    let mut persistence = create_test_persistence();
    create_test_admin(&mut persistence);

    let response = login(
        &mut persistence,
        &login_request("admin_user", TEST_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_LIFETIME,
    )
    .unwrap();

    let (actor, user) =
        AuthenticationService::validate_session(&mut persistence, &response.token).unwrap();
    assert_eq!(actor.role, Role::Admin);
    assert_eq!(actor.session_token.as_deref(), Some(response.token.as_str()));
    assert_eq!(me(&user).user.username, "admin_user");

    logout(&mut persistence, &response.token).unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &response.token);
    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_expired_session_is_rejected() {
    let mut persistence = create_test_persistence();
    let actor = create_test_lawyer(&mut persistence, "jsmith");

    persistence
        .create_session("session_expired", actor.user_id, "2020-01-01T00:00:00Z")
        .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, "session_expired");

    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { ref reason }) if reason == "Session expired"
    ));
}

#[test]
fn test_zero_lifetime_session_expires_immediately() {
    let mut persistence = create_test_persistence();
    create_test_lawyer(&mut persistence, "jsmith");

    let response = login(
        &mut persistence,
        &login_request("jsmith", TEST_PASSWORD),
        Duration::seconds(-1),
    )
    .unwrap();

    let result = AuthenticationService::validate_session(&mut persistence, &response.token);
    assert!(result.is_err());
}

#[test]
fn test_unknown_token_is_rejected() {
    let mut persistence = create_test_persistence();

    let result = AuthenticationService::validate_session(&mut persistence, "session_bogus");

    assert!(matches!(
        result,
        Err(AuthError::AuthenticationFailed { ref reason }) if reason == "Invalid session token"
    ));
}
