// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the LegalFlow case-management backend.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use legalflow::AllocationMode;
use legalflow_api::{
    ApiError, CaseInfo, CaseTypeInfo, ClientCaseInfo, ClientInfo, CreateCaseRequest,
    CreateCaseTypeRequest, CreateClientRequest, CreateDocumentRequest, CreateReminderRequest,
    CreateUserRequest, DashboardStatsResponse, DocumentInfo, ListCasesQuery, ListUsersResponse,
    LoginRequest, LoginResponse, MeResponse, MessageResponse, PasswordPolicy, ReminderInfo,
    UpdateCaseRequest, UpdateCaseTypeRequest, UpdateClientRequest, UpdateProfileRequest,
    UpdateReminderRequest, UserInfo,
};
use legalflow_domain::normalize_username;
use legalflow_persistence::{Persistence, SeedSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::SessionUser;

/// LegalFlow Server - HTTP API for the LegalFlow case-management backend
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "LEGALFLOW_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "LEGALFLOW_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "LEGALFLOW_PORT", default_value_t = 3000)]
    port: u16,

    /// How case numbers are allocated: `counter` or `derived`
    #[arg(long, env = "LEGALFLOW_ALLOCATION_MODE", default_value = "counter")]
    allocation_mode: AllocationMode,

    /// Lifetime of a login session in days
    #[arg(
        long,
        env = "LEGALFLOW_SESSION_DAYS",
        default_value_t = 30,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    session_days: i64,

    /// Create the demo user, case types, clients, cases and reminders
    #[arg(long, env = "LEGALFLOW_SEED_DEMO")]
    seed_demo: bool,

    /// Username of the administrator created when no users exist
    #[arg(long, env = "LEGALFLOW_ADMIN_USERNAME", requires = "admin_password")]
    admin_username: Option<String>,

    /// Password of the administrator created when no users exist
    #[arg(long, env = "LEGALFLOW_ADMIN_PASSWORD", requires = "admin_username")]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// Lifetime of sessions opened by `login`.
    session_lifetime: Duration,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

type Created<T> = (StatusCode, Json<T>);

// ============================================================================
// Authentication
// ============================================================================

/// Handler for POST `/api/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(username = %req.username, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse =
        legalflow_api::login(&mut persistence, &req, app_state.session_lifetime)?;
    Ok(Json(response))
}

/// Handler for POST `/api/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<MessageResponse>, HttpError> {
    let token: &str = actor.session_token.as_deref().ok_or_else(|| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("No session to log out of"),
    })?;

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = legalflow_api::logout(&mut persistence, token)?;
    info!(user_id = actor.user_id, "User logged out");
    Ok(Json(response))
}

/// Handler for GET `/api/auth/me`.
#[allow(clippy::unused_async)]
async fn handle_me(SessionUser(_actor, user): SessionUser) -> Json<MeResponse> {
    Json(legalflow_api::me(&user))
}

// ============================================================================
// Users
// ============================================================================

async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::list_users(&mut persistence, &actor)?))
}

async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Created<UserInfo>, HttpError> {
    info!(username = %req.username, actor = actor.user_id, "Handling create_user request");

    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = legalflow_api::create_user(&mut persistence, &actor, &req)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::get_user(&mut persistence, &actor, user_id)?))
}

async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::delete_user(
        &mut persistence,
        &actor,
        user_id,
    )?))
}

/// Handler for PUT `/api/user/{id}`.
async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::update_profile(
        &mut persistence,
        &actor,
        user_id,
        &req,
    )?))
}

// ============================================================================
// Clients
// ============================================================================

async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<Vec<ClientInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::list_clients(&mut persistence)?))
}

async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Json(req): Json<CreateClientRequest>,
) -> Result<Created<ClientInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let client: ClientInfo = legalflow_api::create_client(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn handle_get_client(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(client_id): Path<i64>,
) -> Result<Json<ClientInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::get_client(&mut persistence, client_id)?))
}

async fn handle_update_client(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(client_id): Path<i64>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<Json<ClientInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::update_client(
        &mut persistence,
        client_id,
        &req,
    )?))
}

async fn handle_delete_client(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(client_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::delete_client(
        &mut persistence,
        client_id,
    )?))
}

/// Handler for GET `/api/clients/{id}/cases`.
async fn handle_list_client_cases(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(client_id): Path<i64>,
) -> Result<Json<Vec<ClientCaseInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::list_client_cases(
        &mut persistence,
        client_id,
    )?))
}

// ============================================================================
// Case types
// ============================================================================

async fn handle_list_case_types(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<Vec<CaseTypeInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::list_case_types(&mut persistence)?))
}

async fn handle_create_case_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Json(req): Json<CreateCaseTypeRequest>,
) -> Result<Created<CaseTypeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let case_type: CaseTypeInfo =
        legalflow_api::create_case_type(&mut persistence, &actor, &req)?;
    Ok((StatusCode::CREATED, Json(case_type)))
}

async fn handle_get_case_type(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(case_type_id): Path<i64>,
) -> Result<Json<CaseTypeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::get_case_type(
        &mut persistence,
        case_type_id,
    )?))
}

async fn handle_update_case_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(case_type_id): Path<i64>,
    Json(req): Json<UpdateCaseTypeRequest>,
) -> Result<Json<CaseTypeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::update_case_type(
        &mut persistence,
        &actor,
        case_type_id,
        &req,
    )?))
}

async fn handle_delete_case_type(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor, _user): SessionUser,
    Path(case_type_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::delete_case_type(
        &mut persistence,
        &actor,
        case_type_id,
    )?))
}

// ============================================================================
// Cases
// ============================================================================

/// Handler for GET `/api/cases`, optionally filtered by `clientId`.
async fn handle_list_cases(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Query(query): Query<ListCasesQuery>,
) -> Result<Json<Vec<CaseInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::list_cases(&mut persistence, &query)?))
}

/// Handler for POST `/api/cases`.
///
/// The case number is allocated while the persistence lock is held, inside
/// the insert transaction.
async fn handle_create_case(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Json(req): Json<CreateCaseRequest>,
) -> Result<Created<CaseInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let case: CaseInfo = legalflow_api::create_case(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(case)))
}

async fn handle_get_case(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(case_id): Path<i64>,
) -> Result<Json<CaseInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::get_case(&mut persistence, case_id)?))
}

async fn handle_update_case(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(case_id): Path<i64>,
    Json(req): Json<UpdateCaseRequest>,
) -> Result<Json<CaseInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::update_case(
        &mut persistence,
        case_id,
        &req,
    )?))
}

async fn handle_delete_case(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(case_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::delete_case(&mut persistence, case_id)?))
}

// ============================================================================
// Documents
// ============================================================================

async fn handle_list_case_documents(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(case_id): Path<i64>,
) -> Result<Json<Vec<DocumentInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::list_case_documents(
        &mut persistence,
        case_id,
    )?))
}

async fn handle_create_document(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Created<DocumentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let document: DocumentInfo = legalflow_api::create_document(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn handle_delete_document(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(document_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::delete_document(
        &mut persistence,
        document_id,
    )?))
}

// ============================================================================
// Reminders
// ============================================================================

async fn handle_list_reminders(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<Vec<ReminderInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::list_reminders(&mut persistence)?))
}

async fn handle_create_reminder(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Json(req): Json<CreateReminderRequest>,
) -> Result<Created<ReminderInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let reminder: ReminderInfo = legalflow_api::create_reminder(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

async fn handle_get_reminder(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(reminder_id): Path<i64>,
) -> Result<Json<ReminderInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::get_reminder(
        &mut persistence,
        reminder_id,
    )?))
}

async fn handle_update_reminder(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(reminder_id): Path<i64>,
    Json(req): Json<UpdateReminderRequest>,
) -> Result<Json<ReminderInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::update_reminder(
        &mut persistence,
        reminder_id,
        &req,
    )?))
}

async fn handle_delete_reminder(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
    Path(reminder_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::delete_reminder(
        &mut persistence,
        reminder_id,
    )?))
}

// ============================================================================
// Dashboard
// ============================================================================

async fn handle_dashboard_stats(
    AxumState(app_state): AxumState<AppState>,
    _session: SessionUser,
) -> Result<Json<DashboardStatsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(legalflow_api::dashboard_stats(&mut persistence)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/logout", post(handle_logout))
        .route("/api/auth/me", get(handle_me))
        .route("/api/users", get(handle_list_users).post(handle_create_user))
        .route(
            "/api/users/{id}",
            get(handle_get_user).delete(handle_delete_user),
        )
        .route("/api/user/{id}", put(handle_update_profile))
        .route(
            "/api/clients",
            get(handle_list_clients).post(handle_create_client),
        )
        .route(
            "/api/clients/{id}",
            get(handle_get_client)
                .put(handle_update_client)
                .delete(handle_delete_client),
        )
        .route("/api/clients/{id}/cases", get(handle_list_client_cases))
        .route(
            "/api/case-types",
            get(handle_list_case_types).post(handle_create_case_type),
        )
        .route(
            "/api/case-types/{id}",
            get(handle_get_case_type)
                .put(handle_update_case_type)
                .delete(handle_delete_case_type),
        )
        .route("/api/cases", get(handle_list_cases).post(handle_create_case))
        .route(
            "/api/cases/{id}",
            get(handle_get_case)
                .put(handle_update_case)
                .delete(handle_delete_case),
        )
        .route("/api/cases/{id}/documents", get(handle_list_case_documents))
        .route("/api/case-documents", post(handle_create_document))
        .route(
            "/api/case-documents/{id}",
            axum::routing::delete(handle_delete_document),
        )
        .route(
            "/api/reminders",
            get(handle_list_reminders).post(handle_create_reminder),
        )
        .route(
            "/api/reminders/{id}",
            get(handle_get_reminder)
                .put(handle_update_reminder)
                .delete(handle_delete_reminder),
        )
        .route("/api/dashboard/stats", get(handle_dashboard_stats))
        .with_state(app_state)
}

/// Opens the database and runs the startup tasks.
///
/// Expired sessions are purged, the demo data is seeded when requested, and
/// an administrator is created when the database has no users and
/// credentials were given. Seeding runs first, so a seeded database never
/// receives a bootstrap administrator.
fn initialize_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    let mut persistence: Persistence = persistence.with_allocation_mode(args.allocation_mode);
    info!(mode = %args.allocation_mode, "Case number allocation mode");

    let purged: usize = persistence.delete_expired_sessions()?;
    if purged > 0 {
        info!(purged, "Purged expired sessions");
    }

    if args.seed_demo {
        let summary: SeedSummary = persistence.seed_demo_data()?;
        info!(cases = summary.cases, "Demo data ready");
    }

    if let (Some(username), Some(password)) = (&args.admin_username, &args.admin_password) {
        let username: String = normalize_username(username)?;
        PasswordPolicy::default().validate(password, &username)?;
        match persistence.bootstrap_admin(&username, password)? {
            Some(user_id) => info!(user_id, username = %username, "Administrator created"),
            None => info!("Users already exist; administrator bootstrap skipped"),
        }
    } else if persistence.count_users()? == 0 {
        warn!("No users exist; pass --admin-username and --admin-password to create one");
    }

    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing LegalFlow Server");

    let persistence: Persistence = initialize_persistence(&args)?;
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        session_lifetime: Duration::days(args.session_days),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
