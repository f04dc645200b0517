// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case type queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::CaseTypeData;
use crate::diesel_schema::{case_types, cases};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = case_types)]
struct CaseTypeRow {
    case_type_id: i64,
    name: String,
    code: Option<String>,
    created_at: String,
}

impl From<CaseTypeRow> for CaseTypeData {
    fn from(row: CaseTypeRow) -> Self {
        Self {
            case_type_id: row.case_type_id,
            name: row.name,
            code: row.code,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a case type by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the case type is not found.
pub fn get_case_type(
    conn: &mut SqliteConnection,
    case_type_id: i64,
) -> Result<Option<CaseTypeData>, PersistenceError> {
    debug!("Looking up case type by ID: {}", case_type_id);

    let row: Option<CaseTypeRow> = case_types::table
        .filter(case_types::case_type_id.eq(case_type_id))
        .select(CaseTypeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(CaseTypeData::from))
}

/// Retrieves a case type by its unique name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_case_type_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<CaseTypeData>, PersistenceError> {
    let row: Option<CaseTypeRow> = case_types::table
        .filter(case_types::name.eq(name))
        .select(CaseTypeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(CaseTypeData::from))
}

/// Lists case types ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_case_types(
    conn: &mut SqliteConnection,
) -> Result<Vec<CaseTypeData>, PersistenceError> {
    let rows: Vec<CaseTypeRow> = case_types::table
        .order(case_types::name.asc())
        .select(CaseTypeRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(CaseTypeData::from).collect())
}

/// Counts the cases that reference a case type.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_cases_referencing(
    conn: &mut SqliteConnection,
    case_type_id: i64,
) -> Result<u64, PersistenceError> {
    let count: i64 = cases::table
        .filter(cases::case_type_id.eq(case_type_id))
        .count()
        .get_result(conn)?;

    Ok(count.unsigned_abs())
}
