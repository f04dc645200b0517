// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case queries, including the counts case numbering is derived from.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use tracing::debug;

use crate::data_models::{CaseData, CaseWithCounts};
use crate::diesel_schema::{case_documents, case_number_counters, cases, reminders};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = cases)]
struct CaseRow {
    case_id: i64,
    title: String,
    case_number: Option<String>,
    case_type_id: Option<i64>,
    status: String,
    priority: String,
    description: Option<String>,
    client_id: Option<i64>,
    nic: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<CaseRow> for CaseData {
    fn from(row: CaseRow) -> Self {
        Self {
            case_id: row.case_id,
            title: row.title,
            case_number: row.case_number,
            case_type_id: row.case_type_id,
            status: row.status,
            priority: row.priority,
            description: row.description,
            client_id: row.client_id,
            nic: row.nic,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Retrieves a case by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the case is not found.
pub fn get_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<Option<CaseData>, PersistenceError> {
    debug!("Looking up case by ID: {}", case_id);

    let row: Option<CaseRow> = cases::table
        .filter(cases::case_id.eq(case_id))
        .select(CaseRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(CaseData::from))
}

/// Retrieves a case by its case number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_case_by_number(
    conn: &mut SqliteConnection,
    case_number: &str,
) -> Result<Option<CaseData>, PersistenceError> {
    let row: Option<CaseRow> = cases::table
        .filter(cases::case_number.eq(case_number))
        .select(CaseRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(CaseData::from))
}

/// Lists cases newest first, optionally restricted to one client.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_cases(
    conn: &mut SqliteConnection,
    client_id: Option<i64>,
) -> Result<Vec<CaseData>, PersistenceError> {
    let mut query = cases::table
        .order((cases::created_at.desc(), cases::case_id.desc()))
        .select(CaseRow::as_select())
        .into_boxed();

    if let Some(client_id) = client_id {
        query = query.filter(cases::client_id.eq(client_id));
    }

    let rows: Vec<CaseRow> = query.load(conn)?;
    Ok(rows.into_iter().map(CaseData::from).collect())
}

/// Lists a client's cases with their document and reminder counts.
///
/// # Errors
///
/// Returns an error if a database query fails.
pub fn list_cases_with_counts(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Vec<CaseWithCounts>, PersistenceError> {
    let cases: Vec<CaseData> = list_cases(conn, Some(client_id))?;
    let case_ids: Vec<i64> = cases.iter().map(|c| c.case_id).collect();

    let document_counts: HashMap<i64, i64> = case_documents::table
        .filter(case_documents::case_id.eq_any(&case_ids))
        .group_by(case_documents::case_id)
        .select((case_documents::case_id, count_star()))
        .load::<(i64, i64)>(conn)?
        .into_iter()
        .collect();

    let reminder_counts: HashMap<i64, i64> = reminders::table
        .filter(reminders::case_id.eq_any(&case_ids))
        .group_by(reminders::case_id)
        .select((reminders::case_id, count_star()))
        .load::<(Option<i64>, i64)>(conn)?
        .into_iter()
        .filter_map(|(case_id, count)| case_id.map(|id| (id, count)))
        .collect();

    Ok(cases
        .into_iter()
        .map(|case| {
            let document_count: u64 = document_counts
                .get(&case.case_id)
                .map_or(0, |c| c.unsigned_abs());
            let reminder_count: u64 = reminder_counts
                .get(&case.case_id)
                .map_or(0, |c| c.unsigned_abs());
            CaseWithCounts {
                case,
                document_count,
                reminder_count,
            }
        })
        .collect())
}

/// Counts all cases.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_cases(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(cases::table.count().get_result(conn)?)
}

/// Counts cases with the given status.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_cases_with_status(
    conn: &mut SqliteConnection,
    status: &str,
) -> Result<i64, PersistenceError> {
    Ok(cases::table
        .filter(cases::status.eq(status))
        .count()
        .get_result(conn)?)
}

/// Finds a client's case by exact title.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_client_case_by_title(
    conn: &mut SqliteConnection,
    client_id: i64,
    title: &str,
) -> Result<Option<CaseData>, PersistenceError> {
    let row: Option<CaseRow> = cases::table
        .filter(cases::client_id.eq(client_id))
        .filter(cases::title.eq(title))
        .order(cases::case_id.asc())
        .select(CaseRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(CaseData::from))
}

// ============================================================================
// Case numbering
// ============================================================================

/// Counts cases of a case type created in `year`.
///
/// Stored timestamps always begin with the four digit UTC year.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_cases_created_in_year(
    conn: &mut SqliteConnection,
    case_type_id: i64,
    year: i32,
) -> Result<u64, PersistenceError> {
    let count: i64 = cases::table
        .filter(cases::case_type_id.eq(case_type_id))
        .filter(cases::created_at.like(format!("{year:04}-%")))
        .count()
        .get_result(conn)?;

    Ok(count.unsigned_abs())
}

/// Counts cases of a case type whose case number contains `fragment`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_case_numbers_containing(
    conn: &mut SqliteConnection,
    case_type_id: i64,
    fragment: &str,
) -> Result<u64, PersistenceError> {
    let count: i64 = cases::table
        .filter(cases::case_type_id.eq(case_type_id))
        .filter(cases::case_number.like(format!("%{fragment}%")))
        .count()
        .get_result(conn)?;

    Ok(count.unsigned_abs())
}

/// Loads the stored numbering counter for `(case_type_id, year)`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_case_number_counter(
    conn: &mut SqliteConnection,
    case_type_id: i64,
    year: i32,
) -> Result<Option<u64>, PersistenceError> {
    let last: Option<i64> = case_number_counters::table
        .filter(case_number_counters::case_type_id.eq(case_type_id))
        .filter(case_number_counters::year.eq(year))
        .select(case_number_counters::last_sequence)
        .first(conn)
        .optional()?;

    Ok(last.map(i64::unsigned_abs))
}
