// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the password policy and password changes.

use crate::handlers::{login, update_profile};
use crate::request_response::{LoginRequest, UpdateProfileRequest};
use crate::tests::helpers::{
    TEST_PASSWORD, create_test_admin, create_test_lawyer, create_test_persistence,
};
use crate::{ApiError, AuthenticationService, PasswordPolicy, PasswordPolicyError};

#[test]
fn test_policy_accepts_reasonable_password() {
    let policy = PasswordPolicy::default();
    assert!(policy.validate("hunter22", "jsmith").is_ok());
}

#[test]
fn test_policy_rejects_short_password() {
    let policy = PasswordPolicy::default();

    assert_eq!(
        policy.validate("abc12", "jsmith"),
        Err(PasswordPolicyError::TooShort { min_length: 6 })
    );
}

#[test]
fn test_policy_counts_characters_not_bytes() {
    let policy = PasswordPolicy::default();
    // Five characters, more than six bytes.
    assert!(policy.validate("ééééé", "jsmith").is_err());
}

#[test]
fn test_policy_rejects_password_equal_to_username() {
    let policy = PasswordPolicy::default();

    assert_eq!(
        policy.validate("JSmith01", "jsmith01"),
        Err(PasswordPolicyError::MatchesForbiddenField {
            field: String::from("username"),
        })
    );
}

fn login_token(persistence: &mut legalflow_persistence::Persistence, password: &str) -> String {
    login(
        persistence,
        &LoginRequest {
            username: String::from("jsmith"),
            password: password.to_string(),
        },
        AuthenticationService::DEFAULT_SESSION_LIFETIME,
    )
    .unwrap()
    .token
}

#[test]
fn test_own_password_change_requires_current_password() {
    let mut persistence = create_test_persistence();
    let actor = create_test_lawyer(&mut persistence, "jsmith");

    let request = UpdateProfileRequest {
        password: Some(String::from("brand-new-pass")),
        ..UpdateProfileRequest::default()
    };
    let result = update_profile(&mut persistence, &actor, actor.user_id, &request);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "currentPassword"
    ));
}

#[test]
fn test_own_password_change_rejects_wrong_current_password() {
    let mut persistence = create_test_persistence();
    let actor = create_test_lawyer(&mut persistence, "jsmith");

    let request = UpdateProfileRequest {
        password: Some(String::from("brand-new-pass")),
        current_password: Some(String::from("wrong-guess")),
        ..UpdateProfileRequest::default()
    };
    let result = update_profile(&mut persistence, &actor, actor.user_id, &request);

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_password_change_keeps_current_session_and_revokes_others() {
    let mut persistence = create_test_persistence();
    create_test_lawyer(&mut persistence, "jsmith");

    let current = login_token(&mut persistence, TEST_PASSWORD);
    let other = login_token(&mut persistence, TEST_PASSWORD);
    let (actor, _) = AuthenticationService::validate_session(&mut persistence, &current).unwrap();

    let request = UpdateProfileRequest {
        password: Some(String::from("brand-new-pass")),
        current_password: Some(TEST_PASSWORD.to_string()),
        ..UpdateProfileRequest::default()
    };
    update_profile(&mut persistence, &actor, actor.user_id, &request).unwrap();

    assert!(AuthenticationService::validate_session(&mut persistence, &current).is_ok());
    assert!(AuthenticationService::validate_session(&mut persistence, &other).is_err());

    // Only the new password works from now on.
    login_token(&mut persistence, "brand-new-pass");
    let old = login(
        &mut persistence,
        &LoginRequest {
            username: String::from("jsmith"),
            password: TEST_PASSWORD.to_string(),
        },
        AuthenticationService::DEFAULT_SESSION_LIFETIME,
    );
    assert!(old.is_err());
}

#[test]
fn test_admin_resets_password_without_current_and_revokes_all_sessions() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin(&mut persistence);
    let target = create_test_lawyer(&mut persistence, "jsmith");
    let token = login_token(&mut persistence, TEST_PASSWORD);

    let request = UpdateProfileRequest {
        password: Some(String::from("reset-by-admin")),
        ..UpdateProfileRequest::default()
    };
    update_profile(&mut persistence, &admin, target.user_id, &request).unwrap();

    assert!(AuthenticationService::validate_session(&mut persistence, &token).is_err());
    login_token(&mut persistence, "reset-by-admin");
}

#[test]
fn test_password_change_enforces_policy() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin(&mut persistence);
    let target = create_test_lawyer(&mut persistence, "jsmith");

    let request = UpdateProfileRequest {
        password: Some(String::from("short")),
        ..UpdateProfileRequest::default()
    };
    let result = update_profile(&mut persistence, &admin, target.user_id, &request);

    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}
