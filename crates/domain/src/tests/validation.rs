// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, format_timestamp, normalize_case_type_code, normalize_username, parse_timestamp,
    validate_case_type_name, validate_client_name, validate_email, validate_title,
};
use time::OffsetDateTime;
use time::macros::datetime;

#[test]
fn test_validate_title_trims_and_accepts() {
    assert_eq!(validate_title("  Smith v. Jones ").unwrap(), "Smith v. Jones");
}

#[test]
fn test_validate_title_rejects_blank() {
    assert!(matches!(
        validate_title("   "),
        Err(DomainError::InvalidTitle(_))
    ));
}

#[test]
fn test_validate_title_rejects_overlong() {
    let title: String = "x".repeat(201);
    assert!(matches!(
        validate_title(&title),
        Err(DomainError::InvalidTitle(_))
    ));
    assert!(validate_title(&"x".repeat(200)).is_ok());
}

#[test]
fn test_validate_client_name_rejects_blank() {
    assert!(matches!(
        validate_client_name(""),
        Err(DomainError::InvalidName(_))
    ));
    assert_eq!(validate_client_name(" Ana ").unwrap(), "Ana");
}

#[test]
fn test_validate_email_accepts_common_shapes() {
    assert!(validate_email("client@example.com").is_ok());
    assert!(validate_email("first.last@mail.example.co").is_ok());
}

#[test]
fn test_validate_email_rejects_malformed() {
    for bad in [
        "no-at-sign",
        "@example.com",
        "a@b@example.com",
        "a@example",
        "a@.com",
        "a b@example.com",
        "a@example.",
    ] {
        assert!(
            matches!(validate_email(bad), Err(DomainError::InvalidEmail(_))),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn test_normalize_username_lowercases() {
    assert_eq!(normalize_username("Demo_Lawyer").unwrap(), "demo_lawyer");
}

#[test]
fn test_normalize_username_enforces_length_and_charset() {
    assert!(matches!(
        normalize_username("ab"),
        Err(DomainError::InvalidUsername(_))
    ));
    assert!(matches!(
        normalize_username("has space"),
        Err(DomainError::InvalidUsername(_))
    ));
    assert!(normalize_username("abc").is_ok());
}

#[test]
fn test_validate_case_type_name() {
    assert_eq!(
        validate_case_type_name(" Personal Injury ").unwrap(),
        "Personal Injury"
    );
    assert!(matches!(
        validate_case_type_name(" "),
        Err(DomainError::InvalidCaseTypeName(_))
    ));
}

#[test]
fn test_normalize_case_type_code_blank_is_none() {
    assert_eq!(normalize_case_type_code(None).unwrap(), None);
    assert_eq!(normalize_case_type_code(Some("  ")).unwrap(), None);
}

#[test]
fn test_normalize_case_type_code_uppercases() {
    assert_eq!(
        normalize_case_type_code(Some("civ")).unwrap(),
        Some(String::from("CIV"))
    );
}

#[test]
fn test_normalize_case_type_code_rejects_separators() {
    assert!(matches!(
        normalize_case_type_code(Some("C/V")),
        Err(DomainError::InvalidCaseTypeCode(_))
    ));
    assert!(matches!(
        normalize_case_type_code(Some("ABCDEFGHIJK")),
        Err(DomainError::InvalidCaseTypeCode(_))
    ));
}

#[test]
fn test_timestamp_round_trip_is_rfc3339() {
    let instant: OffsetDateTime = datetime!(2025-03-04 10:15:00 UTC);
    let text: String = format_timestamp(instant).unwrap();
    assert_eq!(text, "2025-03-04T10:15:00Z");
    assert_eq!(parse_timestamp(&text).unwrap(), instant);
}

#[test]
fn test_parse_timestamp_rejects_plain_date() {
    assert!(matches!(
        parse_timestamp("2025-03-04"),
        Err(DomainError::TimestampParseError { .. })
    ));
}

#[test]
fn test_format_timestamp_normalizes_to_utc_whole_seconds() {
    let instant: OffsetDateTime = datetime!(2025-12-31 22:30:15.75 -05:00);
    assert_eq!(format_timestamp(instant).unwrap(), "2026-01-01T03:30:15Z");
}
