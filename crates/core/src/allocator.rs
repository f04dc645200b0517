// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::ledger::CaseNumberLedger;
use crate::mode::AllocationMode;
use legalflow_domain::{CaseNumber, CaseType, year_fragment};
use time::OffsetDateTime;
use tracing::debug;

/// Returns the calendar year case numbers allocated at `now` belong to.
#[must_use]
pub const fn allocation_year(now: OffsetDateTime) -> i32 {
    now.year()
}

/// Counts the cases that precede a new case of `case_type_id` in `year`.
///
/// The primary count uses creation timestamps. When it finds nothing the
/// case numbers themselves are searched for the `/{year}/` fragment, which
/// picks up cases imported with a number but without a matching timestamp.
///
/// # Errors
///
/// Returns the ledger's error if either count fails.
pub fn count_preceding_cases<L: CaseNumberLedger>(
    ledger: &mut L,
    case_type_id: i64,
    year: i32,
) -> Result<u64, L::Error> {
    let count: u64 = ledger.count_cases_in_year(case_type_id, year)?;
    if count > 0 {
        return Ok(count);
    }

    let fragment: String = year_fragment(year);
    let fallback: u64 = ledger.count_case_numbers_containing(case_type_id, &fragment)?;
    debug!(case_type_id, year, fallback, "Primary case count empty, used number fragment");
    Ok(fallback)
}

/// Allocates the next case number for `case_type` in `year`.
///
/// # Errors
///
/// Returns an error if the case type has not been persisted, if it yields an
/// empty code, or if the ledger fails.
pub fn allocate_case_number<L>(
    ledger: &mut L,
    case_type: &CaseType,
    year: i32,
    mode: AllocationMode,
) -> Result<CaseNumber, L::Error>
where
    L: CaseNumberLedger,
    L::Error: From<CoreError>,
{
    let case_type_id: i64 = case_type
        .case_type_id()
        .ok_or_else(|| CoreError::CaseTypeNotPersisted {
            name: case_type.name().to_string(),
        })?;

    let code: String = case_type.type_code();
    if code.is_empty() {
        return Err(CoreError::EmptyTypeCode {
            name: case_type.name().to_string(),
        }
        .into());
    }

    let last: u64 = match mode {
        AllocationMode::Derived => count_preceding_cases(ledger, case_type_id, year)?,
        AllocationMode::Counter => match ledger.load_counter(case_type_id, year)? {
            Some(last) => last,
            None => count_preceding_cases(ledger, case_type_id, year)?,
        },
    };
    let proposed: u64 = last.saturating_add(1);

    let number: CaseNumber = first_free_number(ledger, &code, year, proposed)?;
    if mode == AllocationMode::Counter {
        ledger.store_counter(case_type_id, year, number.sequence())?;
    }

    debug!(%number, %mode, "Allocated case number");
    Ok(number)
}

/// Walks forward from `sequence` until the formatted number is unused.
///
/// Deleted cases lower the derived count and hand-entered numbers can sit
/// ahead of the counter, so the proposed sequence may already be stored.
fn first_free_number<L>(
    ledger: &mut L,
    code: &str,
    year: i32,
    mut sequence: u64,
) -> Result<CaseNumber, L::Error>
where
    L: CaseNumberLedger,
    L::Error: From<CoreError>,
{
    loop {
        let number: CaseNumber = CaseNumber::new(code, year, sequence);
        if !ledger.case_number_taken(&number.to_string())? {
            return Ok(number);
        }
        debug!(%number, "Case number already stored, skipping");
        sequence = sequence
            .checked_add(1)
            .ok_or_else(|| CoreError::SequenceExhausted {
                code: code.to_string(),
                year,
            })?;
    }
}

/// Decides the case number a new case is stored with.
///
/// A non-empty `explicit` number is kept verbatim and the ledger is not
/// touched. Otherwise a number is allocated when a case type is given. With
/// neither, the case is stored without a number.
///
/// # Errors
///
/// Returns an error if allocation fails.
pub fn resolve_case_number<L>(
    ledger: &mut L,
    explicit: Option<&str>,
    case_type: Option<&CaseType>,
    year: i32,
    mode: AllocationMode,
) -> Result<Option<String>, L::Error>
where
    L: CaseNumberLedger,
    L::Error: From<CoreError>,
{
    if let Some(number) = explicit.filter(|n| !n.is_empty()) {
        return Ok(Some(number.to_string()));
    }

    match case_type {
        Some(case_type) => {
            allocate_case_number(ledger, case_type, year, mode).map(|n| Some(n.to_string()))
        }
        None => Ok(None),
    }
}
