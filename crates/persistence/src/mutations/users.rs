// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User and session mutations.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewUser, UserProfileUpdate};
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;
use crate::timestamps;

fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::PasswordHash(e.to_string()))
}

/// Creates a new user.
///
/// The username is normalized to lowercase and the password is hashed with
/// bcrypt before it is stored.
///
/// # Errors
///
/// Returns `DuplicateUsername` if the username is taken, or an error if the
/// password cannot be hashed or the insert fails.
pub fn create_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<i64, PersistenceError> {
    let normalized: String = user.username.trim().to_lowercase();

    info!(
        "Creating user with username: {}, role: {}",
        normalized, user.role
    );

    let password_hash: String = hash_password(&user.password)?;
    let created_at: String = timestamps::now()?;

    diesel::insert_into(users::table)
        .values((
            users::username.eq(&normalized),
            users::password_hash.eq(&password_hash),
            users::full_name.eq(&user.full_name),
            users::email.eq(&user.email),
            users::phone.eq(&user.phone),
            users::bar_number.eq(&user.bar_number),
            users::practice_areas.eq(&user.practice_areas),
            users::role.eq(&user.role),
            users::created_at.eq(&created_at),
        ))
        .execute(conn)
        .map_err(|e| match e {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                PersistenceError::DuplicateUsername(normalized.clone())
            }
            other => PersistenceError::from(other),
        })?;

    let user_id: i64 = get_last_insert_rowid(conn)?;

    info!(user_id, "User created");
    Ok(user_id)
}

/// Records a successful login.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_last_login(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    debug!("Updating last_login_at for user ID: {}", user_id);

    let now: String = timestamps::now()?;
    diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::last_login_at.eq(Some(now)))
        .execute(conn)?;

    Ok(())
}

#[derive(AsChangeset)]
#[diesel(table_name = users)]
struct UserProfileChangeset<'a> {
    full_name: Option<&'a str>,
    email: Option<Option<&'a str>>,
    phone: Option<Option<&'a str>>,
    bar_number: Option<Option<&'a str>>,
    practice_areas: Option<Option<&'a str>>,
}

/// Applies a profile update. Fields set to `None` are left unchanged.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist, or an error if the update
/// fails.
pub fn update_user_profile(
    conn: &mut SqliteConnection,
    user_id: i64,
    update: &UserProfileUpdate,
) -> Result<(), PersistenceError> {
    info!("Updating profile for user ID: {}", user_id);

    let changeset = UserProfileChangeset {
        full_name: update.full_name.as_deref(),
        email: update.email.as_deref().map(Some),
        phone: update.phone.as_deref().map(Some),
        bar_number: update.bar_number.as_deref().map(Some),
        practice_areas: update.practice_areas.as_deref().map(Some),
    };

    let exists: i64 = users::table
        .filter(users::user_id.eq(user_id))
        .count()
        .get_result(conn)?;
    if exists == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }

    if !update.is_empty() {
        diesel::update(users::table.filter(users::user_id.eq(user_id)))
            .set(&changeset)
            .execute(conn)?;
    }
    Ok(())
}

/// Replaces a user's password.
///
/// # Errors
///
/// Returns an error if the password cannot be hashed or the update fails.
pub fn update_password(
    conn: &mut SqliteConnection,
    user_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!("Updating password for user ID: {}", user_id);

    let password_hash: String = hash_password(new_password)?;
    let rows_affected: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::password_hash.eq(&password_hash))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a user. Their sessions are removed by cascade.
///
/// # Errors
///
/// Returns `NotFound` if the user does not exist.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!("Deleting user ID: {}", user_id);

    let rows_affected: usize = diesel::delete(users::table)
        .filter(users::user_id.eq(user_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User with ID {user_id} not found"
        )));
    }
    Ok(())
}

/// Creates a new session.
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(
        "Creating session for user ID: {} with expiration: {}",
        user_id, expires_at
    );

    let now: String = timestamps::now()?;
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::created_at.eq(&now),
            sessions::last_activity_at.eq(&now),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;
    debug!(session_id, user_id, "Session created");
    Ok(session_id)
}

/// Refreshes the last activity timestamp of a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    let now: String = timestamps::now()?;
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(&now))
        .execute(conn)?;

    Ok(())
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut SqliteConnection, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes every session of a user except the one identified by `keep_token`.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_other_sessions(
    conn: &mut SqliteConnection,
    user_id: i64,
    keep_token: Option<&str>,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = match keep_token {
        Some(token) => diesel::delete(sessions::table)
            .filter(sessions::user_id.eq(user_id))
            .filter(sessions::session_token.ne(token))
            .execute(conn)?,
        None => diesel::delete(sessions::table)
            .filter(sessions::user_id.eq(user_id))
            .execute(conn)?,
    };

    info!(user_id, rows_affected, "Revoked sessions");
    Ok(rows_affected)
}

/// Deletes all sessions whose expiry lies in the past.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let now: String = timestamps::now()?;
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(&now))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
