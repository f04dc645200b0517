// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case mutations.
//!
//! Case creation is the only place case numbers are allocated. The counts,
//! the counter update and the insert share one transaction.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use legalflow::{AllocationMode, allocation_year, resolve_case_number};
use legalflow_domain::{CaseStatus, CaseType, Priority};
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{CaseData, CaseUpdate, NewCase};
use crate::diesel_schema::cases;
use crate::error::PersistenceError;
use crate::ledger::SqliteLedger;
use crate::queries::{case_types, cases as case_queries, clients};
use crate::timestamps;

/// The identity and number of a newly stored case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCase {
    pub case_id: i64,
    pub case_number: Option<String>,
}

fn load_case_type(
    conn: &mut SqliteConnection,
    case_type_id: i64,
) -> Result<CaseType, PersistenceError> {
    case_types::get_case_type(conn, case_type_id)?
        .map(|data| data.to_domain())
        .ok_or_else(|| {
            PersistenceError::InvalidReference(format!("Case type {case_type_id} does not exist"))
        })
}

fn ensure_client_exists(conn: &mut SqliteConnection, client_id: i64) -> Result<(), PersistenceError> {
    if clients::get_client(conn, client_id)?.is_none() {
        return Err(PersistenceError::InvalidReference(format!(
            "Client {client_id} does not exist"
        )));
    }
    Ok(())
}

fn map_case_number_conflict(err: DieselError, case_number: Option<&str>) -> PersistenceError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::DuplicateCaseNumber(case_number.unwrap_or_default().to_string())
        }
        other => PersistenceError::from(other),
    }
}

fn insert_case(
    conn: &mut SqliteConnection,
    new_case: &NewCase,
    year: i32,
    created_at: &str,
    mode: AllocationMode,
) -> Result<CreatedCase, PersistenceError> {
    let case_type: Option<CaseType> = match new_case.case_type_id {
        Some(case_type_id) => Some(load_case_type(conn, case_type_id)?),
        None => None,
    };
    if let Some(client_id) = new_case.client_id {
        ensure_client_exists(conn, client_id)?;
    }

    let case_number: Option<String> = resolve_case_number(
        &mut SqliteLedger::new(conn),
        new_case.case_number.as_deref(),
        case_type.as_ref(),
        year,
        mode,
    )?;

    diesel::insert_into(cases::table)
        .values((
            cases::title.eq(&new_case.title),
            cases::case_number.eq(&case_number),
            cases::case_type_id.eq(new_case.case_type_id),
            cases::status.eq(new_case.status.as_str()),
            cases::priority.eq(new_case.priority.as_str()),
            cases::description.eq(&new_case.description),
            cases::client_id.eq(new_case.client_id),
            cases::nic.eq(&new_case.nic),
            cases::created_at.eq(created_at),
            cases::updated_at.eq(created_at),
        ))
        .execute(conn)
        .map_err(|e| map_case_number_conflict(e, case_number.as_deref()))?;

    let case_id: i64 = get_last_insert_rowid(conn)?;
    Ok(CreatedCase {
        case_id,
        case_number,
    })
}

/// Creates a case, allocating its case number when needed.
///
/// `now` is captured once by the caller; it becomes the case's creation
/// timestamp and its calendar year (in UTC) scopes the allocated number.
/// In `Counter` mode the transaction takes the write lock before the first
/// count, so concurrent writers cannot observe the same counter value. In
/// `Derived` mode the read happens before the lock is taken and a competing
/// writer makes the upgrade fail.
///
/// # Errors
///
/// Returns `InvalidReference` for a missing case type or client,
/// `DuplicateCaseNumber` if an explicit number is already stored,
/// `WriteConflict` if another connection held the write lock, or an error
/// if the database fails.
pub fn create_case(
    conn: &mut SqliteConnection,
    new_case: &NewCase,
    now: OffsetDateTime,
    mode: AllocationMode,
) -> Result<CreatedCase, PersistenceError> {
    let now: OffsetDateTime = now.to_offset(UtcOffset::UTC);
    let created_at: String = timestamps::stored(now)?;
    let year: i32 = allocation_year(now);

    debug!(title = %new_case.title, %mode, year, "Creating case");

    let run = |conn: &mut SqliteConnection| insert_case(conn, new_case, year, &created_at, mode);
    let result: Result<CreatedCase, PersistenceError> = if mode.requires_write_lock() {
        conn.immediate_transaction(run)
    } else {
        conn.transaction(run)
    };
    let created: CreatedCase = result.map_err(|err| {
        if err.is_busy() {
            warn!(%mode, error = %err, "Case creation lost a write race");
            PersistenceError::WriteConflict(err.to_string())
        } else {
            err
        }
    })?;

    info!(
        case_id = created.case_id,
        case_number = created.case_number.as_deref().unwrap_or(""),
        "Case created"
    );
    Ok(created)
}

#[derive(AsChangeset)]
#[diesel(table_name = cases)]
struct CaseChangeset<'a> {
    title: Option<&'a str>,
    case_number: Option<Option<&'a str>>,
    case_type_id: Option<Option<i64>>,
    status: Option<&'a str>,
    priority: Option<&'a str>,
    description: Option<Option<&'a str>>,
    client_id: Option<Option<i64>>,
    nic: Option<Option<&'a str>>,
    updated_at: &'a str,
}

/// Applies a partial update to a case and refreshes `updated_at`.
///
/// The case number is never recomputed. A number may be supplied only for
/// a case that has none yet.
///
/// # Errors
///
/// Returns `NotFound` if the case does not exist, `CaseNumberImmutable` when
/// replacing an existing number, `InvalidReference` for a missing case type
/// or client, or `DuplicateCaseNumber` if the supplied number is taken.
pub fn update_case(
    conn: &mut SqliteConnection,
    case_id: i64,
    update: &CaseUpdate,
) -> Result<(), PersistenceError> {
    info!("Updating case ID: {}", case_id);

    let updated_at: String = timestamps::now()?;

    conn.transaction::<(), PersistenceError, _>(|conn| {
        let existing: CaseData = case_queries::get_case(conn, case_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("Case {case_id} not found")))?;

        let new_number: Option<&str> = update.case_number.as_deref().filter(|n| !n.is_empty());
        let case_number: Option<Option<&str>> = match (new_number, existing.case_number.as_deref())
        {
            (None, _) => None,
            (Some(number), Some(current)) if !current.is_empty() => {
                if number != current {
                    return Err(PersistenceError::CaseNumberImmutable { case_id });
                }
                None
            }
            (Some(number), _) => Some(Some(number)),
        };

        if let Some(Some(case_type_id)) = update.case_type_id {
            load_case_type(conn, case_type_id)?;
        }
        if let Some(Some(client_id)) = update.client_id {
            ensure_client_exists(conn, client_id)?;
        }

        let changeset = CaseChangeset {
            title: update.title.as_deref(),
            case_number,
            case_type_id: update.case_type_id,
            status: update.status.as_ref().map(CaseStatus::as_str),
            priority: update.priority.as_ref().map(Priority::as_str),
            description: update.description.as_ref().map(Option::as_deref),
            client_id: update.client_id,
            nic: update.nic.as_ref().map(Option::as_deref),
            updated_at: &updated_at,
        };

        diesel::update(cases::table.filter(cases::case_id.eq(case_id)))
            .set(&changeset)
            .execute(conn)
            .map_err(|e| map_case_number_conflict(e, new_number))?;

        Ok(())
    })
}

/// Deletes a case. Its reminders and documents are removed by cascade.
///
/// # Errors
///
/// Returns `NotFound` if the case does not exist.
pub fn delete_case(conn: &mut SqliteConnection, case_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting case ID: {}", case_id);

    let rows_affected: usize = diesel::delete(cases::table)
        .filter(cases::case_id.eq(case_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Case {case_id} not found"
        )));
    }
    Ok(())
}
