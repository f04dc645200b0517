// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod case_number;
mod case_type;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use case_number::{CaseNumber, year_fragment};
pub use case_type::{CaseType, derive_type_code};
pub use error::DomainError;
pub use types::{CaseStatus, ClientStatus, Priority, ReminderKind};
pub use validation::{
    format_timestamp, normalize_case_type_code, normalize_username, parse_timestamp,
    validate_case_type_name, validate_client_name, validate_email, validate_title,
};
