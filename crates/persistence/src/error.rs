// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use legalflow::CoreError;
use legalflow_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// Another case already carries this case number.
    DuplicateCaseNumber(String),
    /// A concurrent writer held the database; the operation can be retried.
    WriteConflict(String),
    /// Another case type already uses this name.
    DuplicateCaseTypeName(String),
    /// Another user already uses this username.
    DuplicateUsername(String),
    /// A uniqueness constraint failed outside the cases above.
    UniqueViolation(String),
    /// The case type cannot be deleted while cases reference it.
    CaseTypeInUse { case_type_id: i64, case_count: u64 },
    /// A non-empty case number cannot be replaced.
    CaseNumberImmutable { case_id: i64 },
    /// A referenced row does not exist.
    InvalidReference(String),
    /// Case numbering failed.
    Allocation(CoreError),
    /// A stored or supplied value violated a domain rule.
    Domain(DomainError),
    /// Password hashing or verification failed.
    PasswordHash(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::DuplicateCaseNumber(number) => {
                write!(f, "Case number '{number}' is already in use")
            }
            Self::WriteConflict(msg) => {
                write!(f, "Concurrent write conflict, retry the request: {msg}")
            }
            Self::DuplicateCaseTypeName(name) => {
                write!(f, "Case type '{name}' already exists")
            }
            Self::DuplicateUsername(username) => {
                write!(f, "Username '{username}' is already taken")
            }
            Self::UniqueViolation(msg) => write!(f, "Uniqueness violation: {msg}"),
            Self::CaseTypeInUse {
                case_type_id,
                case_count,
            } => write!(
                f,
                "Case type {case_type_id} cannot be deleted: referenced by {case_count} case(s)"
            ),
            Self::CaseNumberImmutable { case_id } => {
                write!(f, "Case {case_id} already has a case number")
            }
            Self::InvalidReference(msg) => write!(f, "Invalid reference: {msg}"),
            Self::Allocation(err) => write!(f, "Case number allocation failed: {err}"),
            Self::Domain(err) => write!(f, "{err}"),
            Self::PasswordHash(msg) => write!(f, "Password hashing failed: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::InvalidReference(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl PersistenceError {
    /// Returns true for a database error `SQLite` raised because another
    /// connection held the lock (`SQLITE_BUSY`).
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::DatabaseError(msg) if msg.contains("database is locked"))
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Allocation(err)
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}
