// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use legalflow::CoreError;
use legalflow_domain::DomainError;
use legalflow_persistence::PersistenceError;
use tracing::error;

use crate::password_policy::PasswordPolicyError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain, core and persistence errors and represent
/// the API contract. The server maps each variant to one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The request conflicts with stored state.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidTitle(_) => invalid("title", message),
        DomainError::InvalidName(_) | DomainError::InvalidCaseTypeName(_) => {
            invalid("name", message)
        }
        DomainError::InvalidEmail(_) => invalid("email", message),
        DomainError::InvalidUsername(_) => invalid("username", message),
        DomainError::InvalidCaseTypeCode(_) => invalid("code", message),
        DomainError::InvalidCaseStatus(_) | DomainError::InvalidClientStatus(_) => {
            invalid("status", message)
        }
        DomainError::InvalidPriority(_) => invalid("priority", message),
        DomainError::InvalidReminderKind(_) => invalid("type", message),
        DomainError::TimestampParseError { .. } => invalid("dueDate", message),
        DomainError::TimestampFormatError(_) => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::UnknownAllocationMode(_) => invalid("allocationMode", err.to_string()),
        CoreError::CaseTypeNotPersisted { .. }
        | CoreError::EmptyTypeCode { .. }
        | CoreError::SequenceExhausted { .. } => {
            ApiError::DomainRuleViolation {
                rule: String::from("case_number_code"),
                message: err.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Conflicts with stored rows become `DomainRuleViolation`; anything the
/// caller cannot fix becomes `Internal` and is logged.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::DuplicateCaseNumber(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_case_number"),
            message: err.to_string(),
        },
        PersistenceError::WriteConflict(_) => ApiError::DomainRuleViolation {
            rule: String::from("write_conflict"),
            message: err.to_string(),
        },
        PersistenceError::DuplicateCaseTypeName(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_case_type_name"),
            message: err.to_string(),
        },
        PersistenceError::DuplicateUsername(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_username"),
            message: err.to_string(),
        },
        PersistenceError::UniqueViolation(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique"),
            message: err.to_string(),
        },
        PersistenceError::CaseTypeInUse { .. } => ApiError::DomainRuleViolation {
            rule: String::from("case_type_in_use"),
            message: err.to_string(),
        },
        PersistenceError::CaseNumberImmutable { .. } => ApiError::DomainRuleViolation {
            rule: String::from("case_number_immutable"),
            message: err.to_string(),
        },
        PersistenceError::InvalidReference(message) => invalid("reference", message),
        PersistenceError::Allocation(core_err) => translate_core_error(core_err),
        PersistenceError::Domain(domain_err) => translate_domain_error(domain_err),
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
