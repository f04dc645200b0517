// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::ReminderData;
use crate::diesel_schema::reminders;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = reminders)]
struct ReminderRow {
    reminder_id: i64,
    title: String,
    description: Option<String>,
    due_date: String,
    location: Option<String>,
    kind: String,
    priority: String,
    completed: i32,
    case_id: Option<i64>,
    created_at: String,
}

impl From<ReminderRow> for ReminderData {
    fn from(row: ReminderRow) -> Self {
        Self {
            reminder_id: row.reminder_id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            location: row.location,
            kind: row.kind,
            priority: row.priority,
            completed: row.completed != 0,
            case_id: row.case_id,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a reminder by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_reminder(
    conn: &mut SqliteConnection,
    reminder_id: i64,
) -> Result<Option<ReminderData>, PersistenceError> {
    debug!("Looking up reminder by ID: {}", reminder_id);

    let row: Option<ReminderRow> = reminders::table
        .filter(reminders::reminder_id.eq(reminder_id))
        .select(ReminderRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ReminderData::from))
}

/// Retrieves a reminder by exact title.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_reminder_by_title(
    conn: &mut SqliteConnection,
    title: &str,
) -> Result<Option<ReminderData>, PersistenceError> {
    let row: Option<ReminderRow> = reminders::table
        .filter(reminders::title.eq(title))
        .order(reminders::reminder_id.asc())
        .select(ReminderRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ReminderData::from))
}

/// Lists reminders by ascending due date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_reminders(conn: &mut SqliteConnection) -> Result<Vec<ReminderData>, PersistenceError> {
    let rows: Vec<ReminderRow> = reminders::table
        .order((reminders::due_date.asc(), reminders::reminder_id.asc()))
        .select(ReminderRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(ReminderData::from).collect())
}

/// Counts reminders that are not completed.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_pending_reminders(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(reminders::table
        .filter(reminders::completed.eq(0))
        .count()
        .get_result(conn)?)
}
