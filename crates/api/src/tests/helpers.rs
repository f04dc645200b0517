// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use legalflow_persistence::{NewUser, Persistence};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::handlers::{create_case_type, create_client};
use crate::request_response::{
    CaseTypeInfo, ClientInfo, CreateCaseRequest, CreateCaseTypeRequest, CreateClientRequest,
};
use crate::{AuthenticatedActor, Role};

pub const TEST_PASSWORD: &str = "correct-horse";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_instant() -> OffsetDateTime {
    datetime!(2026-03-15 10:30:00 UTC)
}

fn create_test_user(
    persistence: &mut Persistence,
    username: &str,
    role: Role,
) -> AuthenticatedActor {
    let user_id: i64 = persistence
        .create_user(&NewUser {
            username: username.to_string(),
            password: TEST_PASSWORD.to_string(),
            full_name: format!("Test {username}"),
            email: None,
            phone: None,
            bar_number: None,
            practice_areas: None,
            role: role.as_str().to_string(),
        })
        .expect("Failed to create test user");
    AuthenticatedActor::new(user_id, username.to_string(), role)
}

pub fn create_test_admin(persistence: &mut Persistence) -> AuthenticatedActor {
    create_test_user(persistence, "admin_user", Role::Admin)
}

pub fn create_test_lawyer(persistence: &mut Persistence, username: &str) -> AuthenticatedActor {
    create_test_user(persistence, username, Role::Lawyer)
}

pub fn create_test_case_type(
    persistence: &mut Persistence,
    admin: &AuthenticatedActor,
    name: &str,
    code: Option<&str>,
) -> CaseTypeInfo {
    let request = CreateCaseTypeRequest {
        name: name.to_string(),
        code: code.map(str::to_string),
    };
    create_case_type(persistence, admin, &request).expect("Failed to create case type")
}

pub fn create_test_client(persistence: &mut Persistence, name: &str) -> ClientInfo {
    let request = CreateClientRequest {
        name: name.to_string(),
        email: None,
        phone: None,
        address: None,
        status: None,
    };
    create_client(persistence, &request).expect("Failed to create client")
}

pub fn create_test_case_request(title: &str, case_type: Option<i64>) -> CreateCaseRequest {
    CreateCaseRequest {
        title: title.to_string(),
        case_type,
        ..CreateCaseRequest::default()
    }
}
