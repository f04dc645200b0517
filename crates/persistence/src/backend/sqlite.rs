// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Opening a connection applies the connection PRAGMAs, runs the embedded
//! migrations and checks that foreign keys are enforced. Domain queries and
//! mutations stay in `queries/` and `mutations/`.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits for a competing lock before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Where the database lives. File databases additionally use WAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Memory,
    File,
}

impl Storage {
    fn pragmas(self) -> Vec<String> {
        let mut pragmas: Vec<String> = vec![
            String::from("PRAGMA foreign_keys = ON"),
            format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"),
        ];
        if self == Self::File {
            pragmas.push(String::from("PRAGMA journal_mode = WAL"));
        }
        pragmas
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Returns the row ID assigned by the most recent insert on `conn`.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled.
///
/// Cascading deletes of cases, reminders and documents, and the protection
/// of referenced case types, all depend on it.
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }
    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Opens a database, configures the connection and brings the schema up to
/// date.
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA, a migration or the foreign
/// key check fails.
pub fn open(database_url: &str, storage: Storage) -> Result<SqliteConnection, PersistenceError> {
    info!(url = %database_url, ?storage, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    for pragma in storage.pragmas() {
        diesel::sql_query(&pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "Applied database migrations");
    }

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}
