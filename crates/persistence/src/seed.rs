// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo data and first-run administrator bootstrap.
//!
//! Every step looks its record up first, so seeding twice creates nothing
//! the second time.

use diesel::SqliteConnection;
use legalflow::AllocationMode;
use legalflow_domain::{CaseStatus, ClientStatus, Priority, ReminderKind};
use time::{Duration, OffsetDateTime};
use tracing::info;

use crate::data_models::{NewCase, NewCaseType, NewClient, NewReminder, NewUser, SeedSummary};
use crate::error::PersistenceError;
use crate::mutations::{case_types, cases, clients, reminders, users};
use crate::queries;
use crate::timestamps;

pub const DEMO_USERNAME: &str = "demo_lawyer";
pub const DEMO_PASSWORD: &str = "demo123";

const DEMO_CASE_TYPES: [&str; 3] = ["Personal Injury", "Corporate Law", "Estate Planning"];

struct DemoClient {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
}

const DEMO_CLIENTS: [DemoClient; 3] = [
    DemoClient {
        name: "Sarah Johnson",
        email: "sarah.johnson@email.com",
        phone: "+1 (555) 123-4567",
        address: "123 Main St, City, State 12345",
    },
    DemoClient {
        name: "Robert Miller",
        email: "robert.miller@email.com",
        phone: "+1 (555) 987-6543",
        address: "456 Oak Ave, City, State 12345",
    },
    DemoClient {
        name: "TechCorp Ltd.",
        email: "contact@techcorp.com",
        phone: "+1 (555) 456-7890",
        address: "789 Business Blvd, City, State 12345",
    },
];

struct DemoCase {
    title: &'static str,
    case_type: usize,
    client: usize,
    status: CaseStatus,
    priority: Priority,
    description: &'static str,
    reminder: DemoReminder,
}

struct DemoReminder {
    title: &'static str,
    description: &'static str,
    days_ahead: i64,
    location: Option<&'static str>,
    kind: ReminderKind,
    priority: Priority,
}

const DEMO_CASES: [DemoCase; 3] = [
    DemoCase {
        title: "Personal Injury Claim",
        case_type: 0,
        client: 0,
        status: CaseStatus::Active,
        priority: Priority::High,
        description: "Slip and fall incident at local grocery store",
        reminder: DemoReminder {
            title: "Court Hearing",
            description: "Personal injury case hearing",
            days_ahead: 7,
            location: Some("Courthouse Room 101"),
            kind: ReminderKind::Hearing,
            priority: Priority::High,
        },
    },
    DemoCase {
        title: "Corporate Contract Review",
        case_type: 1,
        client: 2,
        status: CaseStatus::Active,
        priority: Priority::Medium,
        description: "Review and negotiation of service agreement",
        reminder: DemoReminder {
            title: "Client Meeting",
            description: "Contract review meeting with client",
            days_ahead: 3,
            location: None,
            kind: ReminderKind::Meeting,
            priority: Priority::Medium,
        },
    },
    DemoCase {
        title: "Estate Planning",
        case_type: 2,
        client: 1,
        status: CaseStatus::Pending,
        priority: Priority::Low,
        description: "Will and trust preparation",
        reminder: DemoReminder {
            title: "Document Deadline",
            description: "Submit estate planning documents",
            days_ahead: 14,
            location: None,
            kind: ReminderKind::Deadline,
            priority: Priority::Medium,
        },
    },
];

/// Creates the demo user, case types, clients, cases and reminders that do
/// not exist yet. Case numbers are allocated as for any other case.
///
/// # Errors
///
/// Returns an error if any lookup or insert fails.
pub fn seed_demo_data(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
    mode: AllocationMode,
) -> Result<SeedSummary, PersistenceError> {
    let mut summary: SeedSummary = SeedSummary::default();

    if queries::users::get_user_by_username(conn, DEMO_USERNAME)?.is_none() {
        users::create_user(
            conn,
            &NewUser {
                username: DEMO_USERNAME.to_string(),
                password: DEMO_PASSWORD.to_string(),
                full_name: String::from("Demo Lawyer"),
                email: Some(String::from("demo@legalflow.com")),
                phone: Some(String::from("+1 (555) 123-4567")),
                bar_number: Some(String::from("BAR123456789")),
                practice_areas: Some(String::from(
                    "Personal Injury, Corporate Law, Estate Planning",
                )),
                role: String::from("Admin"),
            },
        )?;
        summary.users += 1;
    }

    let mut case_type_ids: Vec<i64> = Vec::with_capacity(DEMO_CASE_TYPES.len());
    for name in DEMO_CASE_TYPES {
        let id: i64 = match queries::case_types::get_case_type_by_name(conn, name)? {
            Some(existing) => existing.case_type_id,
            None => {
                summary.case_types += 1;
                case_types::create_case_type(
                    conn,
                    &NewCaseType {
                        name: name.to_string(),
                        code: None,
                    },
                )?
            }
        };
        case_type_ids.push(id);
    }

    let mut client_ids: Vec<i64> = Vec::with_capacity(DEMO_CLIENTS.len());
    for client in &DEMO_CLIENTS {
        let id: i64 = match queries::clients::get_client_by_name(conn, client.name)? {
            Some(existing) => existing.client_id,
            None => {
                summary.clients += 1;
                clients::create_client(
                    conn,
                    &NewClient {
                        name: client.name.to_string(),
                        email: Some(client.email.to_string()),
                        phone: Some(client.phone.to_string()),
                        address: Some(client.address.to_string()),
                        status: ClientStatus::Active,
                    },
                )?
            }
        };
        client_ids.push(id);
    }

    for demo in &DEMO_CASES {
        let client_id: i64 = client_ids[demo.client];
        let case_id: i64 =
            match queries::cases::find_client_case_by_title(conn, client_id, demo.title)? {
                Some(existing) => existing.case_id,
                None => {
                    summary.cases += 1;
                    let new_case = NewCase {
                        title: demo.title.to_string(),
                        case_number: None,
                        case_type_id: Some(case_type_ids[demo.case_type]),
                        status: demo.status,
                        priority: demo.priority,
                        description: Some(demo.description.to_string()),
                        client_id: Some(client_id),
                        nic: None,
                    };
                    cases::create_case(conn, &new_case, now, mode)?.case_id
                }
            };

        let reminder: &DemoReminder = &demo.reminder;
        if queries::reminders::get_reminder_by_title(conn, reminder.title)?.is_none() {
            let due: OffsetDateTime = now + Duration::days(reminder.days_ahead);
            reminders::create_reminder(
                conn,
                &NewReminder {
                    title: reminder.title.to_string(),
                    description: Some(reminder.description.to_string()),
                    due_date: timestamps::stored(due)?,
                    location: reminder.location.map(str::to_string),
                    kind: reminder.kind,
                    priority: reminder.priority,
                    completed: false,
                    case_id: Some(case_id),
                },
            )?;
            summary.reminders += 1;
        }
    }

    info!(
        users = summary.users,
        case_types = summary.case_types,
        clients = summary.clients,
        cases = summary.cases,
        reminders = summary.reminders,
        "Demo data seeded"
    );
    Ok(summary)
}

/// Creates an administrator when the database has no users at all.
///
/// Returns the new user's ID, or `None` when users already exist.
///
/// # Errors
///
/// Returns an error if the count or insert fails.
pub fn bootstrap_admin(
    conn: &mut SqliteConnection,
    username: &str,
    password: &str,
) -> Result<Option<i64>, PersistenceError> {
    if queries::users::count_users(conn)? > 0 {
        return Ok(None);
    }

    let user_id: i64 = users::create_user(
        conn,
        &NewUser {
            username: username.to_string(),
            password: password.to_string(),
            full_name: String::from("Administrator"),
            email: None,
            phone: None,
            bar_number: None,
            practice_areas: None,
            role: String::from("Admin"),
        },
    )?;

    info!(user_id, "Bootstrap administrator created");
    Ok(Some(user_id))
}
