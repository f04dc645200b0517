// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the LegalFlow case-management backend.
//!
//! This crate sits between the HTTP server and persistence. It owns the
//! request and response shapes, authentication and role checks, input
//! validation through the domain crate, and the translation of lower-layer
//! errors into [`ApiError`]. Nothing here depends on HTTP.

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

mod auth;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    create_case, create_case_at, create_case_type, create_client, create_document,
    create_reminder, create_user, dashboard_stats, delete_case, delete_case_type, delete_client,
    delete_document, delete_reminder, delete_user, get_case, get_case_type, get_client,
    get_reminder, get_user, list_case_documents, list_case_types, list_cases,
    list_client_cases, list_clients, list_reminders, list_users, login, logout, me,
    update_case, update_case_type, update_client, update_profile, update_reminder,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    CaseInfo, CaseSummaryInfo, CaseTypeInfo, ClientBrief, ClientCaseInfo, ClientInfo,
    CreateCaseRequest, CreateCaseTypeRequest, CreateClientRequest, CreateDocumentRequest,
    CreateReminderRequest, CreateUserRequest, DashboardStatsResponse, DocumentInfo,
    ListCasesQuery, ListUsersResponse, LoginRequest, LoginResponse, MeResponse, MessageResponse,
    ReminderInfo, UpdateCaseRequest, UpdateCaseTypeRequest, UpdateClientRequest,
    UpdateProfileRequest, UpdateReminderRequest, UserInfo,
};
