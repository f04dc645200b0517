// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use legalflow_domain::ClientStatus;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ClientUpdate, NewClient};
use crate::diesel_schema::clients;
use crate::error::PersistenceError;
use crate::timestamps;

/// Creates a client.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_client(conn: &mut SqliteConnection, client: &NewClient) -> Result<i64, PersistenceError> {
    info!("Creating client: {}", client.name);

    let created_at: String = timestamps::now()?;
    diesel::insert_into(clients::table)
        .values((
            clients::name.eq(&client.name),
            clients::email.eq(&client.email),
            clients::phone.eq(&client.phone),
            clients::address.eq(&client.address),
            clients::status.eq(client.status.as_str()),
            clients::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let client_id: i64 = get_last_insert_rowid(conn)?;
    info!(client_id, "Client created");
    Ok(client_id)
}

#[derive(AsChangeset)]
#[diesel(table_name = clients)]
struct ClientChangeset<'a> {
    name: Option<&'a str>,
    email: Option<Option<&'a str>>,
    phone: Option<Option<&'a str>>,
    address: Option<Option<&'a str>>,
    status: Option<&'a str>,
}

/// Applies a partial update to a client.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist.
pub fn update_client(
    conn: &mut SqliteConnection,
    client_id: i64,
    update: &ClientUpdate,
) -> Result<(), PersistenceError> {
    info!("Updating client ID: {}", client_id);

    let exists: i64 = clients::table
        .filter(clients::client_id.eq(client_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Client {client_id} not found"
        )));
    }

    if update.is_empty() {
        return Ok(());
    }

    let changeset = ClientChangeset {
        name: update.name.as_deref(),
        email: update.email.as_deref().map(Some),
        phone: update.phone.as_deref().map(Some),
        address: update.address.as_deref().map(Some),
        status: update.status.as_ref().map(ClientStatus::as_str),
    };

    diesel::update(clients::table.filter(clients::client_id.eq(client_id)))
        .set(&changeset)
        .execute(conn)?;

    Ok(())
}

/// Deletes a client together with its cases.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist.
pub fn delete_client(conn: &mut SqliteConnection, client_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting client ID: {}", client_id);

    let rows_affected: usize = diesel::delete(clients::table)
        .filter(clients::client_id.eq(client_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Client {client_id} not found"
        )));
    }
    Ok(())
}
