// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for role-based authorization.

use crate::handlers::{create_case_type, create_user, delete_case_type, delete_user};
use crate::request_response::{CreateCaseTypeRequest, CreateUserRequest};
use crate::tests::helpers::{
    create_test_admin, create_test_case_type, create_test_lawyer, create_test_persistence,
};
use crate::{ApiError, AuthError, AuthenticatedActor, AuthorizationService, Role};

fn lawyer() -> AuthenticatedActor {
    AuthenticatedActor::new(7, String::from("lawyer"), Role::Lawyer)
}

fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, String::from("admin"), Role::Admin)
}

#[test]
fn test_admin_may_manage_users_and_case_types() {
    assert!(AuthorizationService::authorize_manage_users(&admin()).is_ok());
    assert!(AuthorizationService::authorize_manage_case_types(&admin()).is_ok());
}

#[test]
fn test_lawyer_may_not_manage_users() {
    let result = AuthorizationService::authorize_manage_users(&lawyer());

    assert_eq!(
        result,
        Err(AuthError::Unauthorized {
            action: String::from("manage_users"),
            required_role: String::from("Admin"),
        })
    );
}

#[test]
fn test_profile_update_is_self_or_admin() {
    assert!(AuthorizationService::authorize_update_profile(&lawyer(), 7).is_ok());
    assert!(AuthorizationService::authorize_update_profile(&lawyer(), 8).is_err());
    assert!(AuthorizationService::authorize_update_profile(&admin(), 8).is_ok());
}

#[test]
fn test_role_parse_rejects_unknown_roles() {
    assert_eq!(Role::parse("Admin").unwrap(), Role::Admin);
    assert_eq!(Role::parse("Lawyer").unwrap(), Role::Lawyer);
    assert!(Role::parse("admin").is_err());
    assert!(Role::parse("Paralegal").is_err());
}

#[test]
fn test_lawyer_cannot_create_user() {
    let mut persistence = create_test_persistence();
    let actor = create_test_lawyer(&mut persistence, "jsmith");

    let request = CreateUserRequest {
        username: String::from("newbie"),
        password: String::from("secret-pass"),
        full_name: None,
        email: None,
        phone: None,
        bar_number: None,
        practice_areas: None,
        role: None,
    };
    let result = create_user(&mut persistence, &actor, &request);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_lawyer_cannot_delete_user() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin(&mut persistence);
    let actor = create_test_lawyer(&mut persistence, "jsmith");

    let result = delete_user(&mut persistence, &actor, admin.user_id);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_lawyer_cannot_change_case_types() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin(&mut persistence);
    let actor = create_test_lawyer(&mut persistence, "jsmith");
    let case_type = create_test_case_type(&mut persistence, &admin, "Civil", None);

    let create = create_case_type(
        &mut persistence,
        &actor,
        &CreateCaseTypeRequest {
            name: String::from("Criminal"),
            code: None,
        },
    );
    let delete = delete_case_type(&mut persistence, &actor, case_type.id);

    assert!(matches!(create, Err(ApiError::Unauthorized { .. })));
    assert!(matches!(delete, Err(ApiError::Unauthorized { .. })));
    assert_eq!(persistence.list_case_types().unwrap().len(), 1);
}
