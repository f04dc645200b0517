// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use legalflow_domain::{Priority, ReminderKind};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewReminder, ReminderUpdate};
use crate::diesel_schema::{cases, reminders};
use crate::error::PersistenceError;
use crate::timestamps;

fn ensure_case_exists(conn: &mut SqliteConnection, case_id: i64) -> Result<(), PersistenceError> {
    let exists: i64 = cases::table
        .filter(cases::case_id.eq(case_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::InvalidReference(format!(
            "Case {case_id} does not exist"
        )));
    }
    Ok(())
}

/// Creates a reminder.
///
/// # Errors
///
/// Returns `InvalidReference` if the referenced case does not exist.
pub fn create_reminder(
    conn: &mut SqliteConnection,
    reminder: &NewReminder,
) -> Result<i64, PersistenceError> {
    info!("Creating reminder: {}", reminder.title);

    if let Some(case_id) = reminder.case_id {
        ensure_case_exists(conn, case_id)?;
    }

    let created_at: String = timestamps::now()?;
    diesel::insert_into(reminders::table)
        .values((
            reminders::title.eq(&reminder.title),
            reminders::description.eq(&reminder.description),
            reminders::due_date.eq(&reminder.due_date),
            reminders::location.eq(&reminder.location),
            reminders::kind.eq(reminder.kind.as_str()),
            reminders::priority.eq(reminder.priority.as_str()),
            reminders::completed.eq(i32::from(reminder.completed)),
            reminders::case_id.eq(reminder.case_id),
            reminders::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let reminder_id: i64 = get_last_insert_rowid(conn)?;
    info!(reminder_id, "Reminder created");
    Ok(reminder_id)
}

#[derive(AsChangeset)]
#[diesel(table_name = reminders)]
struct ReminderChangeset<'a> {
    title: Option<&'a str>,
    description: Option<Option<&'a str>>,
    due_date: Option<&'a str>,
    location: Option<Option<&'a str>>,
    kind: Option<&'a str>,
    priority: Option<&'a str>,
    completed: Option<i32>,
    case_id: Option<Option<i64>>,
}

/// Applies a partial update to a reminder.
///
/// # Errors
///
/// Returns `NotFound` if the reminder does not exist, or `InvalidReference`
/// if the new case does not exist.
pub fn update_reminder(
    conn: &mut SqliteConnection,
    reminder_id: i64,
    update: &ReminderUpdate,
) -> Result<(), PersistenceError> {
    info!("Updating reminder ID: {}", reminder_id);

    let exists: i64 = reminders::table
        .filter(reminders::reminder_id.eq(reminder_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Reminder {reminder_id} not found"
        )));
    }

    if let Some(Some(case_id)) = update.case_id {
        ensure_case_exists(conn, case_id)?;
    }

    if update.is_empty() {
        return Ok(());
    }

    let changeset = ReminderChangeset {
        title: update.title.as_deref(),
        description: update.description.as_ref().map(Option::as_deref),
        due_date: update.due_date.as_deref(),
        location: update.location.as_ref().map(Option::as_deref),
        kind: update.kind.as_ref().map(ReminderKind::as_str),
        priority: update.priority.as_ref().map(Priority::as_str),
        completed: update.completed.map(i32::from),
        case_id: update.case_id,
    };

    diesel::update(reminders::table.filter(reminders::reminder_id.eq(reminder_id)))
        .set(&changeset)
        .execute(conn)?;

    Ok(())
}

/// Deletes a reminder.
///
/// # Errors
///
/// Returns `NotFound` if the reminder does not exist.
pub fn delete_reminder(conn: &mut SqliteConnection, reminder_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting reminder ID: {}", reminder_id);

    let rows_affected: usize = diesel::delete(reminders::table)
        .filter(reminders::reminder_id.eq(reminder_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Reminder {reminder_id} not found"
        )));
    }
    Ok(())
}
