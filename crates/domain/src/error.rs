// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Case or reminder title is empty or too long.
    InvalidTitle(String),
    /// Client name is empty or too long.
    InvalidName(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// Username does not satisfy the login name rules.
    InvalidUsername(String),
    /// Case type name is empty or too long.
    InvalidCaseTypeName(String),
    /// Case type code is not alphanumeric.
    InvalidCaseTypeCode(String),
    /// Case status is not part of the vocabulary.
    InvalidCaseStatus(String),
    /// Priority is not part of the vocabulary.
    InvalidPriority(String),
    /// Reminder type is not part of the vocabulary.
    InvalidReminderKind(String),
    /// Client status is not part of the vocabulary.
    InvalidClientStatus(String),
    /// Failed to parse a timestamp from a string.
    TimestampParseError {
        /// The invalid timestamp string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a timestamp.
    TimestampFormatError(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidCaseTypeName(msg) => write!(f, "Invalid case type name: {msg}"),
            Self::InvalidCaseTypeCode(msg) => write!(f, "Invalid case type code: {msg}"),
            Self::InvalidCaseStatus(value) => {
                write!(
                    f,
                    "Invalid case status '{value}'. Must be one of: active, pending, review, closed"
                )
            }
            Self::InvalidPriority(value) => {
                write!(
                    f,
                    "Invalid priority '{value}'. Must be one of: low, medium, high, urgent"
                )
            }
            Self::InvalidReminderKind(value) => {
                write!(
                    f,
                    "Invalid reminder type '{value}'. Must be one of: hearing, deadline, meeting, filing, task, general"
                )
            }
            Self::InvalidClientStatus(value) => {
                write!(
                    f,
                    "Invalid client status '{value}'. Must be one of: active, inactive"
                )
            }
            Self::TimestampParseError { value, error } => {
                write!(f, "Failed to parse timestamp '{value}': {error}")
            }
            Self::TimestampFormatError(msg) => write!(f, "Failed to format timestamp: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
