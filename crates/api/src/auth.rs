// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use legalflow_domain::{format_timestamp, parse_timestamp};
use legalflow_persistence::{Persistence, PersistenceError, SessionData, UserData};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::AuthError;

/// User roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Manages user accounts and the case type catalogue, in addition to
    /// everything a lawyer may do.
    Admin,
    /// Works with clients, cases, documents and reminders.
    Lawyer,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Lawyer => "Lawyer",
        }
    }

    /// Parses a stored role name.
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than `Admin` or `Lawyer`.
    pub fn parse(value: &str) -> Result<Self, AuthError> {
        match value {
            "Admin" => Ok(Self::Admin),
            "Lawyer" => Ok(Self::Lawyer),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Invalid role: {value}"),
            }),
        }
    }
}

/// An authenticated user with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user's database identifier.
    pub user_id: i64,
    /// The user's (lowercase) username.
    pub username: String,
    /// The role assigned to this user.
    pub role: Role,
    /// The token of the session the request arrived with.
    pub session_token: Option<String>,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(user_id: i64, username: String, role: Role) -> Self {
        Self {
            user_id,
            username,
            role,
            session_token: None,
        }
    }

    #[must_use]
    pub fn with_session_token(mut self, token: &str) -> Self {
        self.session_token = Some(token.to_string());
        self
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Lawyer => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Only admins may create or delete user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_users(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_users")
    }

    /// Only admins may change the case type catalogue.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_case_types(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_case_types")
    }

    /// Users may edit their own profile; admins may edit anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-admin targets another user.
    pub fn authorize_update_profile(
        actor: &AuthenticatedActor,
        target_user_id: i64,
    ) -> Result<(), AuthError> {
        if actor.user_id == target_user_id {
            return Ok(());
        }
        Self::require_admin(actor, "update_other_profile")
    }
}

/// Session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime (30 days).
    pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::days(30);

    /// Verifies credentials and opens a session.
    ///
    /// Returns the session token, its expiry timestamp, the actor and the
    /// stored user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown, the password is wrong, or the
    /// session cannot be stored.
    pub fn login(
        persistence: &mut Persistence,
        username: &str,
        password: &str,
        session_lifetime: Duration,
    ) -> Result<(String, String, AuthenticatedActor, UserData), AuthError> {
        let user: UserData = persistence
            .get_user_by_username(username)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!(username, "Login attempt for unknown user");
                Self::invalid_credentials()
            })?;

        let password_valid: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_valid {
            warn!(username = %user.username, "Login attempt with wrong password");
            return Err(Self::invalid_credentials());
        }

        let role: Role = Role::parse(&user.role)?;
        let session_token: String = Self::generate_session_token();
        let expires_at: String = format_timestamp(OffsetDateTime::now_utc() + session_lifetime)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at)
            .map_err(Self::map_persistence_error)?;
        persistence
            .update_last_login(user.user_id)
            .map_err(Self::map_persistence_error)?;

        info!(user_id = user.user_id, username = %user.username, "User logged in");

        let actor: AuthenticatedActor =
            AuthenticatedActor::new(user.user_id, user.username.clone(), role)
                .with_session_token(&session_token);
        Ok((session_token, expires_at, actor, user))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or its user no
    /// longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<(AuthenticatedActor, UserData), AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime =
            parse_timestamp(&session.expires_at).map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;
        if OffsetDateTime::now_utc() > expires_at {
            debug!(session_id = session.session_id, "Session expired");
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;
        let role: Role = Role::parse(&user.role)?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        let actor: AuthenticatedActor =
            AuthenticatedActor::new(user.user_id, user.username.clone(), role)
                .with_session_token(session_token);
        Ok((actor, user))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })
    }

    /// Generates an opaque session token.
    fn generate_session_token() -> String {
        let nanos: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!(
            "session_{nanos}_{:016x}{:016x}",
            rand::random::<u64>(),
            rand::random::<u64>()
        )
    }

    fn invalid_credentials() -> AuthError {
        AuthError::AuthenticationFailed {
            reason: String::from("Invalid credentials"),
        }
    }

    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
