// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const MAX_TITLE_LEN: usize = 200;
const MAX_NAME_LEN: usize = 100;
const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 150;

/// Validates a case or reminder title and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the title is blank or longer than 200 characters.
pub fn validate_title(title: &str) -> Result<String, DomainError> {
    let trimmed: &str = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::InvalidTitle(format!(
            "Title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates a client's name and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than 100 characters.
pub fn validate_client_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates the shape of an email address.
///
/// Only the structure `local@domain.tld` is checked; deliverability is not.
///
/// # Errors
///
/// Returns an error if the address has no single `@`, an empty local part,
/// or a domain without an inner dot.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is missing '@'"
        )));
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid address"
        )));
    }

    let dotted = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if !dotted {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' has an invalid domain"
        )));
    }

    Ok(())
}

/// Normalizes a login name to lowercase and validates it.
///
/// # Errors
///
/// Returns an error if the username is shorter than 3 characters, longer
/// than 150 characters, or contains characters other than ASCII letters,
/// digits, `_`, `.` and `-`.
pub fn normalize_username(username: &str) -> Result<String, DomainError> {
    let normalized: String = username.trim().to_ascii_lowercase();
    let len: usize = normalized.chars().count();

    if len < MIN_USERNAME_LEN {
        return Err(DomainError::InvalidUsername(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if len > MAX_USERNAME_LEN {
        return Err(DomainError::InvalidUsername(format!(
            "Username cannot exceed {MAX_USERNAME_LEN} characters"
        )));
    }
    if !normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(DomainError::InvalidUsername(String::from(
            "Username may only contain letters, digits, '_', '.' and '-'",
        )));
    }

    Ok(normalized)
}

/// Validates a case type name and returns it trimmed.
///
/// # Errors
///
/// Returns an error if the name is blank or longer than 100 characters.
pub fn validate_case_type_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidCaseTypeName(String::from(
            "Name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidCaseTypeName(format!(
            "Name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalizes an optional case type code.
///
/// Blank codes become `None` so that the code is derived from the name.
/// Present codes are uppercased.
///
/// # Errors
///
/// Returns an error if the code contains anything other than ASCII letters
/// and digits, or is longer than 10 characters.
pub fn normalize_case_type_code(code: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidCaseTypeCode(format!(
            "'{code}' must contain only letters and digits"
        )));
    }
    if code.len() > 10 {
        return Err(DomainError::InvalidCaseTypeCode(format!(
            "'{code}' cannot exceed 10 characters"
        )));
    }

    Ok(Some(code.to_ascii_uppercase()))
}

/// Parses an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if the string is not a valid RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| DomainError::TimestampParseError {
        value: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a timestamp as RFC 3339 in UTC with whole seconds.
///
/// Every stored timestamp uses this one shape, so text comparison orders
/// timestamps chronologically and the year is always the leading four
/// characters.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted (e.g. a year
/// outside 0..=9999).
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, DomainError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second]Z"
        ))
        .map_err(|e| DomainError::TimestampFormatError(e.to_string()))
}
