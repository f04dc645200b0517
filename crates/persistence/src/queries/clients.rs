// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashMap;
use tracing::debug;

use crate::data_models::{CaseSummary, ClientData};
use crate::diesel_schema::{cases, clients};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = clients)]
struct ClientRow {
    client_id: i64,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    status: String,
    created_at: String,
}

impl From<ClientRow> for ClientData {
    fn from(row: ClientRow) -> Self {
        Self {
            client_id: row.client_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a client by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the client is not found.
pub fn get_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Option<ClientData>, PersistenceError> {
    debug!("Looking up client by ID: {}", client_id);

    let result: Result<ClientRow, diesel::result::Error> = clients::table
        .filter(clients::client_id.eq(client_id))
        .select(ClientRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a client by exact name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_client_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<ClientData>, PersistenceError> {
    let row: Option<ClientRow> = clients::table
        .filter(clients::name.eq(name))
        .order(clients::client_id.asc())
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ClientData::from))
}

/// Lists clients, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_clients(conn: &mut SqliteConnection) -> Result<Vec<ClientData>, PersistenceError> {
    let rows: Vec<ClientRow> = clients::table
        .order((clients::created_at.desc(), clients::client_id.desc()))
        .select(ClientRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(ClientData::from).collect())
}

/// Loads the case summaries of every client, keyed by client ID.
///
/// Cases without a client are skipped. Each client's list is newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn case_summaries_by_client(
    conn: &mut SqliteConnection,
) -> Result<HashMap<i64, Vec<CaseSummary>>, PersistenceError> {
    let rows: Vec<(i64, Option<i64>, String, Option<String>)> = cases::table
        .filter(cases::client_id.is_not_null())
        .order((cases::created_at.desc(), cases::case_id.desc()))
        .select((
            cases::case_id,
            cases::client_id,
            cases::title,
            cases::case_number,
        ))
        .load(conn)?;

    let mut grouped: HashMap<i64, Vec<CaseSummary>> = HashMap::new();
    for (case_id, client_id, title, case_number) in rows {
        if let Some(client_id) = client_id {
            grouped.entry(client_id).or_default().push(CaseSummary {
                case_id,
                title,
                case_number,
            });
        }
    }

    Ok(grouped)
}

/// Counts all clients.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_clients(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(clients::table.count().get_result(conn)?)
}
