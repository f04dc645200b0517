// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod client_tests;
mod document_tests;

use legalflow::AllocationMode;
use legalflow_domain::ClientStatus;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{NewCase, NewCaseType, NewClient, NewUser, Persistence};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_persistence_with_mode(mode: AllocationMode) -> Persistence {
    create_test_persistence().with_allocation_mode(mode)
}

pub fn create_test_instant() -> OffsetDateTime {
    datetime!(2026-03-15 10:30:00 UTC)
}

pub fn create_test_user(persistence: &mut Persistence, username: &str, role: &str) -> i64 {
    persistence
        .create_user(&NewUser {
            username: username.to_string(),
            password: String::from("secret-password"),
            full_name: format!("{username} full name"),
            email: None,
            phone: None,
            bar_number: None,
            practice_areas: None,
            role: role.to_string(),
        })
        .expect("create user")
}

pub fn create_test_client(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .create_client(&NewClient {
            name: name.to_string(),
            email: None,
            phone: None,
            address: None,
            status: ClientStatus::Active,
        })
        .expect("create client")
}

pub fn create_test_case_type(persistence: &mut Persistence, name: &str, code: Option<&str>) -> i64 {
    persistence
        .create_case_type(&NewCaseType {
            name: name.to_string(),
            code: code.map(str::to_string),
        })
        .expect("create case type")
}

pub fn create_test_new_case(title: &str, case_type_id: Option<i64>) -> NewCase {
    NewCase {
        title: title.to_string(),
        case_type_id,
        ..NewCase::default()
    }
}

/// Creates a typed case at `now` and returns its allocated number.
pub fn allocate_at(persistence: &mut Persistence, case_type_id: i64, now: OffsetDateTime) -> String {
    persistence
        .create_case_at(&create_test_new_case("Numbered case", Some(case_type_id)), now)
        .expect("create case")
        .case_number
        .expect("allocated number")
}
