// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the persistence layer and, except `login`, the
//! authenticated actor. Handlers validate input through the domain layer,
//! enforce authorization, call persistence and build the response DTO. They
//! know nothing about HTTP.

use std::collections::HashMap;
use std::str::FromStr;

use legalflow_domain::{
    CaseStatus, ClientStatus, Priority, ReminderKind, format_timestamp, normalize_case_type_code,
    normalize_username, parse_timestamp, validate_case_type_name, validate_client_name,
    validate_email, validate_title,
};
use legalflow_persistence::{
    CaseData, CaseDocumentData, CaseSummary, CaseTypeData, CaseTypeUpdate, CaseUpdate,
    CaseWithCounts, ClientData, ClientUpdate, CreatedCase, DashboardStats, NewCase,
    NewCaseDocument, NewCaseType, NewClient, NewReminder, NewUser, Persistence, ReminderData,
    ReminderUpdate, UserData, UserProfileUpdate,
};
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
use crate::error::ApiError;
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CaseInfo, CaseSummaryInfo, CaseTypeInfo, ClientBrief, ClientCaseInfo, ClientInfo,
    CreateCaseRequest, CreateCaseTypeRequest, CreateClientRequest, CreateDocumentRequest,
    CreateReminderRequest, CreateUserRequest, DashboardStatsResponse, DocumentInfo,
    ListCasesQuery, ListUsersResponse, LoginRequest, LoginResponse, MeResponse, MessageResponse,
    ReminderInfo, UpdateCaseRequest, UpdateCaseTypeRequest, UpdateClientRequest,
    UpdateProfileRequest, UpdateReminderRequest, UserInfo,
};

// ============================================================================
// Conversions
// ============================================================================

fn user_info(user: &UserData) -> UserInfo {
    UserInfo {
        id: user.user_id,
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        bar_number: user.bar_number.clone(),
        practice_areas: user.practice_areas.clone(),
        role: user.role.clone(),
        created_at: user.created_at.clone(),
        last_login_at: user.last_login_at.clone(),
    }
}

fn case_type_info(case_type: &CaseTypeData) -> CaseTypeInfo {
    CaseTypeInfo {
        id: case_type.case_type_id,
        name: case_type.name.clone(),
        code: case_type.code.clone(),
        type_code: case_type.to_domain().type_code(),
    }
}

fn client_brief(client: &ClientData) -> ClientBrief {
    ClientBrief {
        id: client.client_id,
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        status: client.status.clone(),
    }
}

fn case_summary_info(summary: &CaseSummary) -> CaseSummaryInfo {
    CaseSummaryInfo {
        id: summary.case_id,
        title: summary.title.clone(),
        case_number: summary.case_number.clone(),
    }
}

fn client_info(client: &ClientData, cases: &[CaseSummary]) -> ClientInfo {
    ClientInfo {
        id: client.client_id,
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        address: client.address.clone(),
        status: client.status.clone(),
        created_at: client.created_at.clone(),
        cases: cases.iter().map(case_summary_info).collect(),
    }
}

fn case_info(
    case: &CaseData,
    case_type: Option<&CaseTypeData>,
    client: Option<&ClientData>,
) -> CaseInfo {
    CaseInfo {
        id: case.case_id,
        title: case.title.clone(),
        case_number: case.case_number.clone(),
        case_type: case.case_type_id,
        type_details: case_type.map(case_type_info),
        status: case.status.clone(),
        priority: case.priority.clone(),
        description: case.description.clone(),
        client_id: case.client_id,
        client: client.map(client_brief),
        nic: case.nic.clone(),
        created_at: case.created_at.clone(),
        updated_at: case.updated_at.clone(),
    }
}

fn document_info(document: &CaseDocumentData) -> DocumentInfo {
    DocumentInfo {
        id: document.document_id,
        case_id: document.case_id,
        title: document.title.clone(),
        file: document.file.clone(),
        uploaded_at: document.uploaded_at.clone(),
    }
}

fn reminder_info(reminder: &ReminderData, case: Option<&CaseData>) -> ReminderInfo {
    ReminderInfo {
        id: reminder.reminder_id,
        title: reminder.title.clone(),
        description: reminder.description.clone(),
        due_date: reminder.due_date.clone(),
        location: reminder.location.clone(),
        kind: reminder.kind.clone(),
        priority: reminder.priority.clone(),
        completed: reminder.completed,
        case_id: reminder.case_id,
        case: case.map(|c| CaseSummaryInfo {
            id: c.case_id,
            title: c.title.clone(),
            case_number: c.case_number.clone(),
        }),
        created_at: reminder.created_at.clone(),
    }
}

/// Embeds the case type and client of one case.
fn enrich_case(persistence: &mut Persistence, case: &CaseData) -> Result<CaseInfo, ApiError> {
    let case_type: Option<CaseTypeData> = match case.case_type_id {
        Some(id) => persistence.get_case_type(id)?,
        None => None,
    };
    let client: Option<ClientData> = match case.client_id {
        Some(id) => persistence.get_client(id)?,
        None => None,
    };
    Ok(case_info(case, case_type.as_ref(), client.as_ref()))
}

/// Embeds case types and clients into many cases with one lookup each.
fn enrich_cases(
    persistence: &mut Persistence,
    cases: &[CaseData],
) -> Result<Vec<CaseInfo>, ApiError> {
    let case_types: HashMap<i64, CaseTypeData> = persistence
        .list_case_types()?
        .into_iter()
        .map(|t| (t.case_type_id, t))
        .collect();
    let clients: HashMap<i64, ClientData> = persistence
        .list_clients()?
        .into_iter()
        .map(|c| (c.client_id, c))
        .collect();

    Ok(cases
        .iter()
        .map(|case| {
            case_info(
                case,
                case.case_type_id.and_then(|id| case_types.get(&id)),
                case.client_id.and_then(|id| clients.get(&id)),
            )
        })
        .collect())
}

// ============================================================================
// Input helpers
// ============================================================================

/// Trims an optional text field; blank becomes `None`.
fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Like [`optional_text`], for a field that may be explicitly cleared.
fn nullable_text(value: Option<&Option<String>>) -> Option<Option<String>> {
    value.map(|inner| optional_text(inner.as_deref()))
}

fn optional_email(value: Option<&str>) -> Result<Option<String>, ApiError> {
    let email: Option<String> = optional_text(value);
    if let Some(email) = &email {
        validate_email(email)?;
    }
    Ok(email)
}

/// Parses an optional enumerated value, falling back to its default.
fn parse_or_default<T>(value: Option<&str>) -> Result<T, ApiError>
where
    T: FromStr<Err = legalflow_domain::DomainError> + Default,
{
    optional_text(value).map_or_else(
        || Ok(T::default()),
        |v| T::from_str(&v).map_err(ApiError::from),
    )
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr<Err = legalflow_domain::DomainError>,
{
    optional_text(value)
        .map(|v| T::from_str(&v).map_err(ApiError::from))
        .transpose()
}

/// Parses a due date and returns it in the stored canonical form.
fn canonical_due_date(value: &str) -> Result<String, ApiError> {
    let parsed: OffsetDateTime = parse_timestamp(value.trim())?;
    Ok(format_timestamp(parsed)?)
}

fn not_found(resource_type: &str, id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message: format!("{resource_type} with ID {id} not found"),
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Authenticates a user and opens a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
/// * `session_lifetime` - How long the new session stays valid
///
/// # Errors
///
/// Returns `AuthenticationFailed` for an unknown user or wrong password.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    session_lifetime: Duration,
) -> Result<LoginResponse, ApiError> {
    let username: String = request.username.trim().to_lowercase();
    let (token, expires_at, _actor, user): (String, String, AuthenticatedActor, UserData) =
        AuthenticationService::login(persistence, &username, &request.password, session_lifetime)?;

    // Reload so the response carries the login timestamp just written.
    let user: UserData = persistence.get_user_by_id(user.user_id)?.unwrap_or(user);

    Ok(LoginResponse {
        token,
        expires_at,
        user: user_info(&user),
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(
    persistence: &mut Persistence,
    session_token: &str,
) -> Result<MessageResponse, ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(MessageResponse::new("Logged out"))
}

/// Returns the user behind the current session.
#[must_use]
pub fn me(user: &UserData) -> MeResponse {
    MeResponse {
        user: user_info(user),
    }
}

// ============================================================================
// Users
// ============================================================================

/// Lists all user accounts.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users(
    persistence: &mut Persistence,
    _actor: &AuthenticatedActor,
) -> Result<ListUsersResponse, ApiError> {
    let users: Vec<UserInfo> = persistence.list_users()?.iter().map(user_info).collect();
    Ok(ListUsersResponse { users })
}

/// Retrieves one user account.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no user has this ID.
pub fn get_user(
    persistence: &mut Persistence,
    _actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<UserInfo, ApiError> {
    let user: UserData = persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| not_found("User", user_id))?;
    Ok(user_info(&user))
}

/// Creates a user account.
///
/// Only Admin actors may create users. The role defaults to `Lawyer`.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The username, email, role or password is invalid
/// - The username is already taken
pub fn create_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateUserRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let username: String = normalize_username(&request.username)?;
    let role: Role = match optional_text(request.role.as_deref()) {
        Some(role) => Role::parse(&role).map_err(|_| ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Invalid role: {role}. Must be 'Admin' or 'Lawyer'"),
        })?,
        None => Role::Lawyer,
    };
    PasswordPolicy::default().validate(&request.password, &username)?;
    let email: Option<String> = optional_email(request.email.as_deref())?;

    let user_id: i64 = persistence.create_user(&NewUser {
        username: username.clone(),
        password: request.password.clone(),
        full_name: optional_text(request.full_name.as_deref()).unwrap_or_default(),
        email,
        phone: optional_text(request.phone.as_deref()),
        bar_number: optional_text(request.bar_number.as_deref()),
        practice_areas: optional_text(request.practice_areas.as_deref()),
        role: role.as_str().to_string(),
    })?;

    info!(user_id, username = %username, created_by = actor.user_id, "User created");

    let user: UserData = persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| not_found("User", user_id))?;
    Ok(user_info(&user))
}

/// Updates a user's profile and, optionally, their password.
///
/// Users may edit themselves; admins may edit anyone. A user changing their
/// own password must confirm the current one. A password change ends every
/// other session of the target user.
///
/// # Errors
///
/// Returns an error if:
/// - A non-admin targets another user
/// - The target user does not exist
/// - The email is malformed or the password violates the policy
/// - The current password is missing or wrong
pub fn update_profile(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
    request: &UpdateProfileRequest,
) -> Result<UserInfo, ApiError> {
    AuthorizationService::authorize_update_profile(actor, user_id)?;

    let target: UserData = persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| not_found("User", user_id))?;

    if let Some(email) = request.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim())?;
    }

    if let Some(password) = request.password.as_deref() {
        PasswordPolicy::default().validate(password, &target.username)?;

        if actor.user_id == user_id {
            let current: &str = request.current_password.as_deref().ok_or_else(|| {
                ApiError::InvalidInput {
                    field: String::from("currentPassword"),
                    message: String::from("Current password is required"),
                }
            })?;
            if !persistence.verify_password(current, &target.password_hash)? {
                return Err(ApiError::AuthenticationFailed {
                    reason: String::from("Current password is incorrect"),
                });
            }
        }
    }

    let update = UserProfileUpdate {
        full_name: request.full_name.as_deref().map(|v| v.trim().to_string()),
        email: request.email.as_deref().map(|v| v.trim().to_string()),
        phone: request.phone.as_deref().map(|v| v.trim().to_string()),
        bar_number: request.bar_number.as_deref().map(|v| v.trim().to_string()),
        practice_areas: request
            .practice_areas
            .as_deref()
            .map(|v| v.trim().to_string()),
    };
    persistence.update_user_profile(user_id, &update)?;

    if let Some(password) = request.password.as_deref() {
        persistence.update_password(user_id, password)?;
        let keep: Option<&str> = if actor.user_id == user_id {
            actor.session_token.as_deref()
        } else {
            None
        };
        let revoked: usize = persistence.delete_other_sessions(user_id, keep)?;
        info!(user_id, revoked, "Password changed");
    }

    let user: UserData = persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| not_found("User", user_id))?;
    Ok(user_info(&user))
}

/// Deletes a user account.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Admin
/// - The user does not exist
/// - The user is the last Admin
pub fn delete_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    user_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_manage_users(actor)?;

    let target: UserData = persistence
        .get_user_by_id(user_id)?
        .ok_or_else(|| not_found("User", user_id))?;

    if target.role == Role::Admin.as_str() && persistence.count_admin_users()? <= 1 {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("last_admin"),
            message: String::from("Operation would leave the system without an admin"),
        });
    }

    persistence.delete_user(user_id)?;
    info!(user_id, deleted_by = actor.user_id, "User deleted");
    Ok(MessageResponse::new(format!(
        "User '{}' deleted",
        target.username
    )))
}

// ============================================================================
// Clients
// ============================================================================

/// Lists clients newest first, each with a summary of its cases.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn list_clients(persistence: &mut Persistence) -> Result<Vec<ClientInfo>, ApiError> {
    let clients: Vec<ClientData> = persistence.list_clients()?;
    let summaries: HashMap<i64, Vec<CaseSummary>> = persistence.case_summaries_by_client()?;

    Ok(clients
        .iter()
        .map(|client| {
            let cases: &[CaseSummary] = summaries
                .get(&client.client_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            client_info(client, cases)
        })
        .collect())
}

/// Retrieves one client with a summary of its cases.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no client has this ID.
pub fn get_client(persistence: &mut Persistence, client_id: i64) -> Result<ClientInfo, ApiError> {
    let client: ClientData = persistence
        .get_client(client_id)?
        .ok_or_else(|| not_found("Client", client_id))?;
    let summaries: Vec<CaseSummary> = persistence
        .case_summaries_by_client()?
        .remove(&client_id)
        .unwrap_or_default();
    Ok(client_info(&client, &summaries))
}

/// Creates a client.
///
/// # Errors
///
/// Returns an error if the name, email or status is invalid.
pub fn create_client(
    persistence: &mut Persistence,
    request: &CreateClientRequest,
) -> Result<ClientInfo, ApiError> {
    let name: String = validate_client_name(&request.name)?;
    let email: Option<String> = optional_email(request.email.as_deref())?;
    let status: ClientStatus = parse_or_default(request.status.as_deref())?;

    let client_id: i64 = persistence.create_client(&NewClient {
        name,
        email,
        phone: optional_text(request.phone.as_deref()),
        address: optional_text(request.address.as_deref()),
        status,
    })?;

    get_client(persistence, client_id)
}

/// Applies a partial update to a client.
///
/// # Errors
///
/// Returns an error if the client does not exist or a field is invalid.
pub fn update_client(
    persistence: &mut Persistence,
    client_id: i64,
    request: &UpdateClientRequest,
) -> Result<ClientInfo, ApiError> {
    let name: Option<String> = request
        .name
        .as_deref()
        .map(validate_client_name)
        .transpose()?;
    if let Some(email) = request.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim())?;
    }

    let update = ClientUpdate {
        name,
        email: request.email.as_deref().map(|v| v.trim().to_string()),
        phone: request.phone.as_deref().map(|v| v.trim().to_string()),
        address: request.address.as_deref().map(|v| v.trim().to_string()),
        status: parse_optional(request.status.as_deref())?,
    };
    persistence.update_client(client_id, &update)?;

    get_client(persistence, client_id)
}

/// Deletes a client together with its cases.
///
/// # Errors
///
/// Returns an error if the client does not exist.
pub fn delete_client(
    persistence: &mut Persistence,
    client_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence.delete_client(client_id)?;
    Ok(MessageResponse::new("Client deleted"))
}

/// The enriched cases view of one client: each case with its document and
/// reminder counts.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no client has this ID.
pub fn list_client_cases(
    persistence: &mut Persistence,
    client_id: i64,
) -> Result<Vec<ClientCaseInfo>, ApiError> {
    let client: ClientData = persistence
        .get_client(client_id)?
        .ok_or_else(|| not_found("Client", client_id))?;
    let rows: Vec<CaseWithCounts> = persistence.list_cases_with_counts(client_id)?;

    let mut result: Vec<ClientCaseInfo> = Vec::with_capacity(rows.len());
    for row in rows {
        let case_type: Option<CaseTypeData> = match row.case.case_type_id {
            Some(id) => persistence.get_case_type(id)?,
            None => None,
        };
        result.push(ClientCaseInfo {
            case: case_info(&row.case, case_type.as_ref(), Some(&client)),
            document_count: row.document_count,
            reminder_count: row.reminder_count,
        });
    }
    Ok(result)
}

// ============================================================================
// Case types
// ============================================================================

/// Lists all case types by name.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_case_types(persistence: &mut Persistence) -> Result<Vec<CaseTypeInfo>, ApiError> {
    Ok(persistence
        .list_case_types()?
        .iter()
        .map(case_type_info)
        .collect())
}

/// Retrieves one case type.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no case type has this ID.
pub fn get_case_type(
    persistence: &mut Persistence,
    case_type_id: i64,
) -> Result<CaseTypeInfo, ApiError> {
    let case_type: CaseTypeData = persistence
        .get_case_type(case_type_id)?
        .ok_or_else(|| not_found("Case type", case_type_id))?;
    Ok(case_type_info(&case_type))
}

/// Creates a case type. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the name or code is
/// invalid, or the name is taken.
pub fn create_case_type(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateCaseTypeRequest,
) -> Result<CaseTypeInfo, ApiError> {
    AuthorizationService::authorize_manage_case_types(actor)?;

    let name: String = validate_case_type_name(&request.name)?;
    let code: Option<String> = normalize_case_type_code(request.code.as_deref())?;
    let case_type_id: i64 = persistence.create_case_type(&NewCaseType { name, code })?;

    info!(case_type_id, created_by = actor.user_id, "Case type created");
    get_case_type(persistence, case_type_id)
}

/// Renames a case type or changes its code. Admin only.
///
/// Cases numbered earlier keep their numbers.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the case type does not
/// exist, or the new name or code is invalid or taken.
pub fn update_case_type(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    case_type_id: i64,
    request: &UpdateCaseTypeRequest,
) -> Result<CaseTypeInfo, ApiError> {
    AuthorizationService::authorize_manage_case_types(actor)?;

    let update = CaseTypeUpdate {
        name: request
            .name
            .as_deref()
            .map(validate_case_type_name)
            .transpose()?,
        code: request
            .code
            .as_ref()
            .map(|code| normalize_case_type_code(code.as_deref()))
            .transpose()?,
    };
    persistence.update_case_type(case_type_id, &update)?;

    get_case_type(persistence, case_type_id)
}

/// Deletes a case type that no case references. Admin only.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the case type does not
/// exist, or cases still reference it.
pub fn delete_case_type(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    case_type_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_manage_case_types(actor)?;
    persistence.delete_case_type(case_type_id)?;
    info!(case_type_id, deleted_by = actor.user_id, "Case type deleted");
    Ok(MessageResponse::new("Case type deleted"))
}

// ============================================================================
// Cases
// ============================================================================

/// Lists cases newest first, optionally for one client.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn list_cases(
    persistence: &mut Persistence,
    query: &ListCasesQuery,
) -> Result<Vec<CaseInfo>, ApiError> {
    let cases: Vec<CaseData> = persistence.list_cases(query.client_id)?;
    enrich_cases(persistence, &cases)
}

/// Retrieves one case with its client and case type.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no case has this ID.
pub fn get_case(persistence: &mut Persistence, case_id: i64) -> Result<CaseInfo, ApiError> {
    let case: CaseData = persistence
        .get_case(case_id)?
        .ok_or_else(|| not_found("Case", case_id))?;
    enrich_case(persistence, &case)
}

/// Creates a case.
///
/// A non-empty `caseNumber` is stored as given. Otherwise, when a case type
/// is set, the next number for that type and the current year is allocated
/// in the same transaction as the insert.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The create case request
///
/// # Errors
///
/// Returns an error if:
/// - The title, status or priority is invalid
/// - The case type or client does not exist
/// - The case number is already in use
pub fn create_case(
    persistence: &mut Persistence,
    request: &CreateCaseRequest,
) -> Result<CaseInfo, ApiError> {
    create_case_at(persistence, request, OffsetDateTime::now_utc())
}

/// Creates a case as if at `now`. See [`create_case`].
///
/// # Errors
///
/// See [`create_case`].
pub fn create_case_at(
    persistence: &mut Persistence,
    request: &CreateCaseRequest,
    now: OffsetDateTime,
) -> Result<CaseInfo, ApiError> {
    let new_case = NewCase {
        title: validate_title(&request.title)?,
        case_number: optional_text(request.case_number.as_deref()),
        case_type_id: request.case_type,
        status: parse_or_default::<CaseStatus>(request.status.as_deref())?,
        priority: parse_or_default::<Priority>(request.priority.as_deref())?,
        description: optional_text(request.description.as_deref()),
        client_id: request.client_id,
        nic: optional_text(request.nic.as_deref()),
    };

    let created: CreatedCase = persistence.create_case_at(&new_case, now)?;
    get_case(persistence, created.case_id)
}

/// Applies a partial update to a case.
///
/// The case number is never recomputed. It may be filled in when the case
/// has none; sending the current number again is accepted.
///
/// # Errors
///
/// Returns an error if:
/// - The case does not exist
/// - A field is invalid, or the case type or client does not exist
/// - The request would replace an existing case number
pub fn update_case(
    persistence: &mut Persistence,
    case_id: i64,
    request: &UpdateCaseRequest,
) -> Result<CaseInfo, ApiError> {
    let update = CaseUpdate {
        title: request.title.as_deref().map(validate_title).transpose()?,
        case_number: request.case_number.as_deref().map(|n| n.trim().to_string()),
        case_type_id: request.case_type,
        status: parse_optional(request.status.as_deref())?,
        priority: parse_optional(request.priority.as_deref())?,
        description: nullable_text(request.description.as_ref()),
        client_id: request.client_id,
        nic: nullable_text(request.nic.as_ref()),
    };
    persistence.update_case(case_id, &update)?;

    get_case(persistence, case_id)
}

/// Deletes a case with its documents and reminders.
///
/// # Errors
///
/// Returns an error if the case does not exist.
pub fn delete_case(
    persistence: &mut Persistence,
    case_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence.delete_case(case_id)?;
    Ok(MessageResponse::new("Case deleted"))
}

// ============================================================================
// Documents
// ============================================================================

/// Lists the documents attached to a case.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no case has this ID.
pub fn list_case_documents(
    persistence: &mut Persistence,
    case_id: i64,
) -> Result<Vec<DocumentInfo>, ApiError> {
    if persistence.get_case(case_id)?.is_none() {
        return Err(not_found("Case", case_id));
    }
    Ok(persistence
        .list_documents_for_case(case_id)?
        .iter()
        .map(document_info)
        .collect())
}

/// Records a document's metadata against a case.
///
/// # Errors
///
/// Returns an error if the case does not exist or the title or file
/// reference is blank.
pub fn create_document(
    persistence: &mut Persistence,
    request: &CreateDocumentRequest,
) -> Result<DocumentInfo, ApiError> {
    let title: String = validate_title(&request.title)?;
    let file: String = optional_text(Some(request.file.as_str())).ok_or_else(|| ApiError::InvalidInput {
        field: String::from("file"),
        message: String::from("File reference cannot be empty"),
    })?;
    if persistence.get_case(request.case_id)?.is_none() {
        return Err(not_found("Case", request.case_id));
    }

    let document_id: i64 = persistence.create_document(&NewCaseDocument {
        case_id: request.case_id,
        title,
        file,
    })?;
    let document: CaseDocumentData = persistence
        .get_document(document_id)?
        .ok_or_else(|| not_found("Document", document_id))?;
    Ok(document_info(&document))
}

/// Deletes a document record.
///
/// # Errors
///
/// Returns an error if the document does not exist.
pub fn delete_document(
    persistence: &mut Persistence,
    document_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence.delete_document(document_id)?;
    Ok(MessageResponse::new("Document deleted"))
}

// ============================================================================
// Reminders
// ============================================================================

fn reminder_with_case(
    persistence: &mut Persistence,
    reminder: &ReminderData,
) -> Result<ReminderInfo, ApiError> {
    let case: Option<CaseData> = match reminder.case_id {
        Some(id) => persistence.get_case(id)?,
        None => None,
    };
    Ok(reminder_info(reminder, case.as_ref()))
}

/// Lists reminders by due date, soonest first.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn list_reminders(persistence: &mut Persistence) -> Result<Vec<ReminderInfo>, ApiError> {
    let reminders: Vec<ReminderData> = persistence.list_reminders()?;
    let cases: HashMap<i64, CaseData> = persistence
        .list_cases(None)?
        .into_iter()
        .map(|c| (c.case_id, c))
        .collect();

    Ok(reminders
        .iter()
        .map(|r| reminder_info(r, r.case_id.and_then(|id| cases.get(&id))))
        .collect())
}

/// Retrieves one reminder with its case.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no reminder has this ID.
pub fn get_reminder(
    persistence: &mut Persistence,
    reminder_id: i64,
) -> Result<ReminderInfo, ApiError> {
    let reminder: ReminderData = persistence
        .get_reminder(reminder_id)?
        .ok_or_else(|| not_found("Reminder", reminder_id))?;
    reminder_with_case(persistence, &reminder)
}

/// Creates a reminder.
///
/// # Errors
///
/// Returns an error if the title, due date, type or priority is invalid, or
/// the case does not exist.
pub fn create_reminder(
    persistence: &mut Persistence,
    request: &CreateReminderRequest,
) -> Result<ReminderInfo, ApiError> {
    let reminder_id: i64 = persistence.create_reminder(&NewReminder {
        title: validate_title(&request.title)?,
        description: optional_text(request.description.as_deref()),
        due_date: canonical_due_date(&request.due_date)?,
        location: optional_text(request.location.as_deref()),
        kind: parse_or_default::<ReminderKind>(request.kind.as_deref())?,
        priority: parse_or_default::<Priority>(request.priority.as_deref())?,
        completed: request.completed.unwrap_or(false),
        case_id: request.case_id,
    })?;

    get_reminder(persistence, reminder_id)
}

/// Applies a partial update to a reminder.
///
/// # Errors
///
/// Returns an error if the reminder does not exist, a field is invalid, or
/// the case does not exist.
pub fn update_reminder(
    persistence: &mut Persistence,
    reminder_id: i64,
    request: &UpdateReminderRequest,
) -> Result<ReminderInfo, ApiError> {
    let update = ReminderUpdate {
        title: request.title.as_deref().map(validate_title).transpose()?,
        description: nullable_text(request.description.as_ref()),
        due_date: request
            .due_date
            .as_deref()
            .map(canonical_due_date)
            .transpose()?,
        location: nullable_text(request.location.as_ref()),
        kind: parse_optional(request.kind.as_deref())?,
        priority: parse_optional(request.priority.as_deref())?,
        completed: request.completed,
        case_id: request.case_id,
    };
    persistence.update_reminder(reminder_id, &update)?;

    get_reminder(persistence, reminder_id)
}

/// Deletes a reminder.
///
/// # Errors
///
/// Returns an error if the reminder does not exist.
pub fn delete_reminder(
    persistence: &mut Persistence,
    reminder_id: i64,
) -> Result<MessageResponse, ApiError> {
    persistence.delete_reminder(reminder_id)?;
    Ok(MessageResponse::new("Reminder deleted"))
}

// ============================================================================
// Dashboard
// ============================================================================

/// Counts shown on the dashboard.
///
/// # Errors
///
/// Returns an error if a count query fails.
pub fn dashboard_stats(persistence: &mut Persistence) -> Result<DashboardStatsResponse, ApiError> {
    let stats: DashboardStats = persistence.dashboard_stats()?;
    Ok(DashboardStatsResponse {
        total_cases: stats.total_cases,
        active_cases: stats.active_cases,
        total_clients: stats.total_clients,
        pending_reminders: stats.pending_reminders,
    })
}
