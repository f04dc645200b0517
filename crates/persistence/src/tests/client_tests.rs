// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use legalflow_domain::ClientStatus;

use super::{
    create_test_case_type, create_test_client, create_test_instant, create_test_new_case,
    create_test_persistence,
};
use crate::error::PersistenceError;
use crate::{ClientUpdate, NewCase, NewCaseDocument, NewReminder};

#[test]
fn test_create_and_get_client() {
    let mut persistence = create_test_persistence();
    let client_id = create_test_client(&mut persistence, "Sarah Johnson");

    let client = persistence.get_client(client_id).unwrap().unwrap();
    assert_eq!(client.name, "Sarah Johnson");
    assert_eq!(client.status, "active");
}

#[test]
fn test_list_clients_newest_first() {
    let mut persistence = create_test_persistence();
    let first = create_test_client(&mut persistence, "First");
    let second = create_test_client(&mut persistence, "Second");

    let ids: Vec<i64> = persistence
        .list_clients()
        .unwrap()
        .iter()
        .map(|c| c.client_id)
        .collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_update_client() {
    let mut persistence = create_test_persistence();
    let client_id = create_test_client(&mut persistence, "Robert Miller");

    persistence
        .update_client(
            client_id,
            &ClientUpdate {
                email: Some(String::from("robert@example.com")),
                status: Some(ClientStatus::Inactive),
                ..ClientUpdate::default()
            },
        )
        .unwrap();

    let client = persistence.get_client(client_id).unwrap().unwrap();
    assert_eq!(client.email.as_deref(), Some("robert@example.com"));
    assert_eq!(client.status, "inactive");
    assert_eq!(client.name, "Robert Miller");
}

#[test]
fn test_update_missing_client_is_not_found() {
    let mut persistence = create_test_persistence();
    let result = persistence.update_client(
        5,
        &ClientUpdate {
            name: Some(String::from("Nobody")),
            ..ClientUpdate::default()
        },
    );
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_case_summaries_grouped_by_client() {
    let mut persistence = create_test_persistence();
    let pi = create_test_case_type(&mut persistence, "Personal Injury", None);
    let sarah = create_test_client(&mut persistence, "Sarah");
    let tech = create_test_client(&mut persistence, "TechCorp");
    let now = create_test_instant();

    for (title, client_id) in [("Claim", sarah), ("Appeal", sarah), ("Contract", tech)] {
        persistence
            .create_case_at(
                &NewCase {
                    client_id: Some(client_id),
                    ..create_test_new_case(title, Some(pi))
                },
                now,
            )
            .unwrap();
    }
    persistence
        .create_case_at(&create_test_new_case("No client", None), now)
        .unwrap();

    let summaries = persistence.case_summaries_by_client().unwrap();
    assert_eq!(summaries.len(), 2);
    let sarah_titles: Vec<&str> = summaries[&sarah].iter().map(|s| s.title.as_str()).collect();
    assert_eq!(sarah_titles, vec!["Appeal", "Claim"]);
    assert_eq!(
        summaries[&tech][0].case_number.as_deref(),
        Some("PI/2026/003")
    );
}

#[test]
fn test_cases_with_counts() {
    let mut persistence = create_test_persistence();
    let client_id = create_test_client(&mut persistence, "Counted");
    let now = create_test_instant();
    let with_children = persistence
        .create_case_at(
            &NewCase {
                client_id: Some(client_id),
                ..create_test_new_case("Busy", None)
            },
            now,
        )
        .unwrap()
        .case_id;
    persistence
        .create_case_at(
            &NewCase {
                client_id: Some(client_id),
                ..create_test_new_case("Quiet", None)
            },
            now,
        )
        .unwrap();

    for n in 0..2 {
        persistence
            .create_document(&NewCaseDocument {
                case_id: with_children,
                title: format!("Doc {n}"),
                file: format!("uploads/doc-{n}.pdf"),
            })
            .unwrap();
    }
    persistence
        .create_reminder(&NewReminder {
            title: String::from("Hearing"),
            description: None,
            due_date: String::from("2026-04-01T09:00:00Z"),
            location: None,
            kind: legalflow_domain::ReminderKind::Hearing,
            priority: legalflow_domain::Priority::High,
            completed: false,
            case_id: Some(with_children),
        })
        .unwrap();

    let cases = persistence.list_cases_with_counts(client_id).unwrap();
    assert_eq!(cases.len(), 2);
    let busy = cases.iter().find(|c| c.case.case_id == with_children).unwrap();
    assert_eq!(busy.document_count, 2);
    assert_eq!(busy.reminder_count, 1);
    let quiet = cases.iter().find(|c| c.case.case_id != with_children).unwrap();
    assert_eq!(quiet.document_count, 0);
    assert_eq!(quiet.reminder_count, 0);
}

#[test]
fn test_delete_client_removes_its_cases() {
    let mut persistence = create_test_persistence();
    let client_id = create_test_client(&mut persistence, "Leaving");
    let case_id = persistence
        .create_case_at(
            &NewCase {
                client_id: Some(client_id),
                ..create_test_new_case("Owned", None)
            },
            create_test_instant(),
        )
        .unwrap()
        .case_id;

    persistence.delete_client(client_id).unwrap();

    assert!(persistence.get_client(client_id).unwrap().is_none());
    assert!(persistence.get_case(case_id).unwrap().is_none());
}
