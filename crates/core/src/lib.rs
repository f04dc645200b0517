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

//! Case numbering policy.
//!
//! Case numbers read `{CODE}/{YEAR}/{SEQ}` and are sequential per case type
//! and calendar year. Storage is abstracted behind [`CaseNumberLedger`] so the
//! policy can be exercised without a database.

mod allocator;
mod error;
mod ledger;
mod mode;

#[cfg(test)]
mod tests;

pub use allocator::{
    allocate_case_number, allocation_year, count_preceding_cases, resolve_case_number,
};
pub use error::CoreError;
pub use ledger::CaseNumberLedger;
pub use mode::AllocationMode;
