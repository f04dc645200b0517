// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{CaseTypeUpdate, NewCaseType};
use crate::diesel_schema::case_types;
use crate::error::PersistenceError;
use crate::queries::case_types::count_cases_referencing;
use crate::timestamps;

fn map_name_conflict(err: DieselError, name: &str) -> PersistenceError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::DuplicateCaseTypeName(name.to_string())
        }
        other => PersistenceError::from(other),
    }
}

/// Creates a case type.
///
/// # Errors
///
/// Returns `DuplicateCaseTypeName` if the name is taken.
pub fn create_case_type(
    conn: &mut SqliteConnection,
    case_type: &NewCaseType,
) -> Result<i64, PersistenceError> {
    info!(
        "Creating case type: {} (code: {:?})",
        case_type.name, case_type.code
    );

    let created_at: String = timestamps::now()?;
    diesel::insert_into(case_types::table)
        .values((
            case_types::name.eq(&case_type.name),
            case_types::code.eq(&case_type.code),
            case_types::created_at.eq(&created_at),
        ))
        .execute(conn)
        .map_err(|e| map_name_conflict(e, &case_type.name))?;

    get_last_insert_rowid(conn)
}

#[derive(AsChangeset)]
#[diesel(table_name = case_types)]
struct CaseTypeChangeset<'a> {
    name: Option<&'a str>,
    code: Option<Option<&'a str>>,
}

/// Renames a case type or changes its code.
///
/// Existing case numbers keep the code they were allocated with.
///
/// # Errors
///
/// Returns `NotFound` if the case type does not exist, or
/// `DuplicateCaseTypeName` if the new name is taken.
pub fn update_case_type(
    conn: &mut SqliteConnection,
    case_type_id: i64,
    update: &CaseTypeUpdate,
) -> Result<(), PersistenceError> {
    info!("Updating case type ID: {}", case_type_id);

    let exists: i64 = case_types::table
        .filter(case_types::case_type_id.eq(case_type_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Case type {case_type_id} not found"
        )));
    }

    if update.is_empty() {
        return Ok(());
    }

    let changeset = CaseTypeChangeset {
        name: update.name.as_deref(),
        code: update.code.as_ref().map(Option::as_deref),
    };

    diesel::update(case_types::table.filter(case_types::case_type_id.eq(case_type_id)))
        .set(&changeset)
        .execute(conn)
        .map_err(|e| map_name_conflict(e, update.name.as_deref().unwrap_or_default()))?;

    Ok(())
}

/// Deletes a case type that no case references.
///
/// # Errors
///
/// Returns `CaseTypeInUse` while cases reference it, or `NotFound` if it does
/// not exist.
pub fn delete_case_type(conn: &mut SqliteConnection, case_type_id: i64) -> Result<(), PersistenceError> {
    info!("Attempting to delete case type ID: {}", case_type_id);

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let case_count: u64 = count_cases_referencing(conn, case_type_id)?;
        if case_count > 0 {
            return Err(PersistenceError::CaseTypeInUse {
                case_type_id,
                case_count,
            });
        }

        let rows_affected: usize = diesel::delete(case_types::table)
            .filter(case_types::case_type_id.eq(case_type_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Case type {case_type_id} not found"
            )));
        }

        info!("Deleted case type ID: {}", case_type_id);
        Ok(())
    })
}
