// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the LegalFlow case-management backend.
//!
//! Built on Diesel with the `SQLite` backend. Migrations are embedded and run
//! when a connection is opened; foreign key enforcement is verified at the
//! same time because cascading deletes and the protection of referenced case
//! types depend on it.
//!
//! ## Case numbering
//!
//! Case numbers are allocated inside the transaction that inserts the case.
//! The [`AllocationMode`] chosen at construction decides how:
//!
//! - `Counter` (default) takes the write lock up front (`BEGIN IMMEDIATE`)
//!   and advances a per case type and year counter.
//! - `Derived` counts existing cases in an ordinary transaction.
//!
//! A unique index on `cases.case_number` rejects any duplicate regardless of
//! mode.
//!
//! ## Testing
//!
//! `new_in_memory()` gives every caller its own shared-cache in-memory
//! database, so tests never observe each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use legalflow::AllocationMode;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod ledger;
mod mutations;
mod queries;
mod seed;
mod timestamps;

#[cfg(test)]
mod tests;

pub use data_models::{
    CaseData, CaseDocumentData, CaseSummary, CaseTypeData, CaseTypeUpdate, CaseUpdate,
    CaseWithCounts, ClientData, ClientUpdate, DashboardStats, NewCase, NewCaseDocument,
    NewCaseType, NewClient, NewReminder, NewUser, ReminderData, ReminderUpdate, SeedSummary,
    SessionData, UserData, UserProfileUpdate,
};
pub use error::PersistenceError;
pub use mutations::CreatedCase;
pub use seed::{DEMO_PASSWORD, DEMO_USERNAME};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
    allocation_mode: AllocationMode,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call receives a uniquely named database via an atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_legalflow_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::open(&shared_memory_url, backend::sqlite::Storage::Memory)?;

        Ok(Self {
            conn,
            allocation_mode: AllocationMode::default(),
        })
    }

    /// Creates a persistence adapter over a `SQLite` database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection =
            backend::sqlite::open(path_str, backend::sqlite::Storage::File)?;

        Ok(Self {
            conn,
            allocation_mode: AllocationMode::default(),
        })
    }

    /// Selects how case numbers are allocated.
    #[must_use]
    pub const fn with_allocation_mode(mut self, mode: AllocationMode) -> Self {
        self.allocation_mode = mode;
        self
    }

    #[must_use]
    pub const fn allocation_mode(&self) -> AllocationMode {
        self.allocation_mode
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user, hashing the password.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the username is taken.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user)
    }

    /// Retrieves a user by username (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_id(&mut self.conn, user_id)
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Counts all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_users(&mut self.conn)
    }

    /// Counts users with the `Admin` role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_admin_users(&mut self) -> Result<i64, PersistenceError> {
        queries::users::count_admin_users(&mut self.conn)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_last_login(&mut self.conn, user_id)
    }

    /// Updates profile fields of a user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn update_user_profile(
        &mut self,
        user_id: i64,
        update: &UserProfileUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_user_profile(&mut self.conn, user_id, update)
    }

    /// Replaces a user's password.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn update_password(
        &mut self,
        user_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_password(&mut self.conn, user_id, new_password)
    }

    /// Deletes a user and their sessions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::users::get_session_by_token(&mut self.conn, session_token)
    }

    /// Refreshes a session's last activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::users::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::users::delete_session(&mut self.conn, session_token)
    }

    /// Deletes a user's sessions, optionally keeping one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_other_sessions(
        &mut self,
        user_id: i64,
        keep_token: Option<&str>,
    ) -> Result<usize, PersistenceError> {
        mutations::users::delete_other_sessions(&mut self.conn, user_id, keep_token)
    }

    /// Deletes all expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::users::delete_expired_sessions(&mut self.conn)
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_client(&mut self, client: &NewClient) -> Result<i64, PersistenceError> {
        mutations::clients::create_client(&mut self.conn, client)
    }

    /// Retrieves a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_client(&mut self, client_id: i64) -> Result<Option<ClientData>, PersistenceError> {
        queries::clients::get_client(&mut self.conn, client_id)
    }

    /// Lists clients, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_clients(&mut self) -> Result<Vec<ClientData>, PersistenceError> {
        queries::clients::list_clients(&mut self.conn)
    }

    /// Loads every client's case summaries keyed by client ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn case_summaries_by_client(
        &mut self,
    ) -> Result<HashMap<i64, Vec<CaseSummary>>, PersistenceError> {
        queries::clients::case_summaries_by_client(&mut self.conn)
    }

    /// Updates a client.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist.
    pub fn update_client(
        &mut self,
        client_id: i64,
        update: &ClientUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::clients::update_client(&mut self.conn, client_id, update)
    }

    /// Deletes a client and its cases.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist.
    pub fn delete_client(&mut self, client_id: i64) -> Result<(), PersistenceError> {
        mutations::clients::delete_client(&mut self.conn, client_id)
    }

    /// Lists a client's cases with document and reminder counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_cases_with_counts(
        &mut self,
        client_id: i64,
    ) -> Result<Vec<CaseWithCounts>, PersistenceError> {
        queries::cases::list_cases_with_counts(&mut self.conn, client_id)
    }

    // ========================================================================
    // Case types
    // ========================================================================

    /// Creates a case type.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCaseTypeName` if the name is taken.
    pub fn create_case_type(&mut self, case_type: &NewCaseType) -> Result<i64, PersistenceError> {
        mutations::case_types::create_case_type(&mut self.conn, case_type)
    }

    /// Retrieves a case type by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_case_type(
        &mut self,
        case_type_id: i64,
    ) -> Result<Option<CaseTypeData>, PersistenceError> {
        queries::case_types::get_case_type(&mut self.conn, case_type_id)
    }

    /// Lists case types by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_case_types(&mut self) -> Result<Vec<CaseTypeData>, PersistenceError> {
        queries::case_types::list_case_types(&mut self.conn)
    }

    /// Updates a case type.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `DuplicateCaseTypeName`.
    pub fn update_case_type(
        &mut self,
        case_type_id: i64,
        update: &CaseTypeUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::case_types::update_case_type(&mut self.conn, case_type_id, update)
    }

    /// Deletes an unreferenced case type.
    ///
    /// # Errors
    ///
    /// Returns `CaseTypeInUse` while cases reference it.
    pub fn delete_case_type(&mut self, case_type_id: i64) -> Result<(), PersistenceError> {
        mutations::case_types::delete_case_type(&mut self.conn, case_type_id)
    }

    // ========================================================================
    // Cases
    // ========================================================================

    /// Creates a case at the current instant, allocating its number if needed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference`, `DuplicateCaseNumber`, `WriteConflict` or a
    /// database error.
    pub fn create_case(&mut self, new_case: &NewCase) -> Result<CreatedCase, PersistenceError> {
        self.create_case_at(new_case, OffsetDateTime::now_utc())
    }

    /// Creates a case as if at `now`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference`, `DuplicateCaseNumber`, `WriteConflict` or a
    /// database error.
    pub fn create_case_at(
        &mut self,
        new_case: &NewCase,
        now: OffsetDateTime,
    ) -> Result<CreatedCase, PersistenceError> {
        mutations::cases::create_case(&mut self.conn, new_case, now, self.allocation_mode)
    }

    /// Retrieves a case by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_case(&mut self, case_id: i64) -> Result<Option<CaseData>, PersistenceError> {
        queries::cases::get_case(&mut self.conn, case_id)
    }

    /// Retrieves a case by case number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[cfg(test)]
    pub fn get_case_by_number(
        &mut self,
        case_number: &str,
    ) -> Result<Option<CaseData>, PersistenceError> {
        queries::cases::get_case_by_number(&mut self.conn, case_number)
    }

    /// Lists cases newest first, optionally for one client.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_cases(&mut self, client_id: Option<i64>) -> Result<Vec<CaseData>, PersistenceError> {
        queries::cases::list_cases(&mut self.conn, client_id)
    }

    /// Applies a partial update to a case.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `CaseNumberImmutable`, `InvalidReference` or
    /// `DuplicateCaseNumber`.
    pub fn update_case(&mut self, case_id: i64, update: &CaseUpdate) -> Result<(), PersistenceError> {
        mutations::cases::update_case(&mut self.conn, case_id, update)
    }

    /// Deletes a case with its reminders and documents.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the case does not exist.
    pub fn delete_case(&mut self, case_id: i64) -> Result<(), PersistenceError> {
        mutations::cases::delete_case(&mut self.conn, case_id)
    }

    // ========================================================================
    // Case documents
    // ========================================================================

    /// Records document metadata for a case.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if the case does not exist.
    pub fn create_document(&mut self, document: &NewCaseDocument) -> Result<i64, PersistenceError> {
        mutations::documents::create_document(&mut self.conn, document)
    }

    /// Retrieves a document record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_document(
        &mut self,
        document_id: i64,
    ) -> Result<Option<CaseDocumentData>, PersistenceError> {
        queries::documents::get_document(&mut self.conn, document_id)
    }

    /// Lists the documents of a case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_documents_for_case(
        &mut self,
        case_id: i64,
    ) -> Result<Vec<CaseDocumentData>, PersistenceError> {
        queries::documents::list_documents_for_case(&mut self.conn, case_id)
    }

    /// Deletes a document record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the document does not exist.
    pub fn delete_document(&mut self, document_id: i64) -> Result<(), PersistenceError> {
        mutations::documents::delete_document(&mut self.conn, document_id)
    }

    // ========================================================================
    // Reminders
    // ========================================================================

    /// Creates a reminder.
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` if the case does not exist.
    pub fn create_reminder(&mut self, reminder: &NewReminder) -> Result<i64, PersistenceError> {
        mutations::reminders::create_reminder(&mut self.conn, reminder)
    }

    /// Retrieves a reminder by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_reminder(
        &mut self,
        reminder_id: i64,
    ) -> Result<Option<ReminderData>, PersistenceError> {
        queries::reminders::get_reminder(&mut self.conn, reminder_id)
    }

    /// Lists reminders by due date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_reminders(&mut self) -> Result<Vec<ReminderData>, PersistenceError> {
        queries::reminders::list_reminders(&mut self.conn)
    }

    /// Updates a reminder.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidReference`.
    pub fn update_reminder(
        &mut self,
        reminder_id: i64,
        update: &ReminderUpdate,
    ) -> Result<(), PersistenceError> {
        mutations::reminders::update_reminder(&mut self.conn, reminder_id, update)
    }

    /// Deletes a reminder.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reminder does not exist.
    pub fn delete_reminder(&mut self, reminder_id: i64) -> Result<(), PersistenceError> {
        mutations::reminders::delete_reminder(&mut self.conn, reminder_id)
    }

    // ========================================================================
    // Dashboard & seed
    // ========================================================================

    /// Computes the dashboard counters.
    ///
    /// # Errors
    ///
    /// Returns an error if a count fails.
    pub fn dashboard_stats(&mut self) -> Result<DashboardStats, PersistenceError> {
        queries::dashboard::dashboard_stats(&mut self.conn)
    }

    /// Seeds the demo user and sample records that are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup or insert fails.
    pub fn seed_demo_data(&mut self) -> Result<SeedSummary, PersistenceError> {
        seed::seed_demo_data(
            &mut self.conn,
            OffsetDateTime::now_utc(),
            self.allocation_mode,
        )
    }

    /// Creates an administrator if no users exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the count or insert fails.
    pub fn bootstrap_admin(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<i64>, PersistenceError> {
        seed::bootstrap_admin(&mut self.conn, username, password)
    }
}
