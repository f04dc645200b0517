// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use legalflow_domain::{CaseStatus, CaseType, ClientStatus, Priority, ReminderKind};
use serde::{Deserialize, Serialize};

/// A stored user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bar_number: Option<String>,
    pub practice_areas: Option<String>,
    pub role: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A stored login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientData {
    pub client_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseTypeData {
    pub case_type_id: i64,
    pub name: String,
    pub code: Option<String>,
    pub created_at: String,
}

impl CaseTypeData {
    /// Converts the stored row into the domain type used for numbering.
    #[must_use]
    pub fn to_domain(&self) -> CaseType {
        CaseType::with_id(self.case_type_id, &self.name, self.code.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseData {
    pub case_id: i64,
    pub title: String,
    pub case_number: Option<String>,
    pub case_type_id: Option<i64>,
    pub status: String,
    pub priority: String,
    pub description: Option<String>,
    pub client_id: Option<i64>,
    pub nic: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// The short form of a case listed under its client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSummary {
    pub case_id: i64,
    pub title: String,
    pub case_number: Option<String>,
}

/// A case together with the number of documents and reminders attached to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseWithCounts {
    pub case: CaseData,
    pub document_count: u64,
    pub reminder_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDocumentData {
    pub document_id: i64,
    pub case_id: i64,
    pub title: String,
    pub file: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderData {
    pub reminder_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub location: Option<String>,
    pub kind: String,
    pub priority: String,
    pub completed: bool,
    pub case_id: Option<i64>,
    pub created_at: String,
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_cases: u64,
    pub active_cases: u64,
    pub total_clients: u64,
    pub pending_reminders: u64,
}

// ============================================================================
// Write models
// ============================================================================

/// Fields of a user account to create. The password is hashed on insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bar_number: Option<String>,
    pub practice_areas: Option<String>,
    pub role: String,
}

/// Profile fields that may change after registration. `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bar_number: Option<String>,
    pub practice_areas: Option<String>,
}

impl UserProfileUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.bar_number.is_none()
            && self.practice_areas.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: ClientStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
}

impl ClientUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct NewCaseType {
    pub name: String,
    pub code: Option<String>,
}

/// Case type changes. `code: Some(None)` clears the explicit code.
#[derive(Debug, Clone, Default)]
pub struct CaseTypeUpdate {
    pub name: Option<String>,
    pub code: Option<Option<String>>,
}

impl CaseTypeUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.code.is_none()
    }
}

/// Fields of a case to create.
///
/// `case_number` is kept verbatim when non-empty; otherwise a number is
/// allocated from `case_type_id` if one is given.
#[derive(Debug, Clone, Default)]
pub struct NewCase {
    pub title: String,
    pub case_number: Option<String>,
    pub case_type_id: Option<i64>,
    pub status: CaseStatus,
    pub priority: Priority,
    pub description: Option<String>,
    pub client_id: Option<i64>,
    pub nic: Option<String>,
}

/// Partial case update. Nested options distinguish "leave unchanged" from
/// "clear".
#[derive(Debug, Clone, Default)]
pub struct CaseUpdate {
    pub title: Option<String>,
    pub case_number: Option<String>,
    pub case_type_id: Option<Option<i64>>,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
    pub description: Option<Option<String>>,
    pub client_id: Option<Option<i64>>,
    pub nic: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct NewCaseDocument {
    pub case_id: i64,
    pub title: String,
    pub file: String,
}

/// Fields of a reminder to create. `due_date` must already be normalized.
#[derive(Debug, Clone)]
pub struct NewReminder {
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub location: Option<String>,
    pub kind: ReminderKind,
    pub priority: Priority,
    pub completed: bool,
    pub case_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ReminderUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<String>,
    pub location: Option<Option<String>>,
    pub kind: Option<ReminderKind>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub case_id: Option<Option<i64>>,
}

impl ReminderUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.location.is_none()
            && self.kind.is_none()
            && self.priority.is_none()
            && self.completed.is_none()
            && self.case_id.is_none()
    }
}

/// What the demo seed created on this run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub case_types: usize,
    pub clients: usize,
    pub cases: usize,
    pub reminders: usize,
}
