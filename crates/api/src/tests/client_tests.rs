// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for client management and the enriched client cases view.

use crate::handlers::{
    create_case, create_client, create_document, create_reminder, delete_client, get_case,
    get_client, list_client_cases, list_clients, update_client,
};
use crate::request_response::{
    CreateClientRequest, CreateDocumentRequest, CreateReminderRequest, UpdateClientRequest,
};
use crate::tests::helpers::{
    create_test_admin, create_test_case_request, create_test_case_type, create_test_client,
    create_test_persistence,
};
use crate::ApiError;

#[test]
fn test_create_client_defaults_to_active() {
    let mut persistence = create_test_persistence();

    let client = create_client(
        &mut persistence,
        &CreateClientRequest {
            name: String::from("  Sarah Johnson "),
            email: Some(String::from("sarah@example.com")),
            phone: Some(String::from("+1 555 0100")),
            address: None,
            status: None,
        },
    )
    .unwrap();

    assert_eq!(client.name, "Sarah Johnson");
    assert_eq!(client.status, "active");
    assert_eq!(client.email.as_deref(), Some("sarah@example.com"));
    assert!(client.cases.is_empty());
}

#[test]
fn test_create_client_rejects_blank_name_bad_email_and_unknown_status() {
    let mut persistence = create_test_persistence();

    let blank = create_client(
        &mut persistence,
        &CreateClientRequest {
            name: String::from("   "),
            email: None,
            phone: None,
            address: None,
            status: None,
        },
    );
    assert!(matches!(
        blank,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "name"
    ));

    let email = create_client(
        &mut persistence,
        &CreateClientRequest {
            name: String::from("Robert Miller"),
            email: Some(String::from("robert@")),
            phone: None,
            address: None,
            status: None,
        },
    );
    assert!(matches!(
        email,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "email"
    ));

    let status = create_client(
        &mut persistence,
        &CreateClientRequest {
            name: String::from("Robert Miller"),
            email: None,
            phone: None,
            address: None,
            status: Some(String::from("dormant")),
        },
    );
    assert!(matches!(
        status,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));

    assert!(list_clients(&mut persistence).unwrap().is_empty());
}

#[test]
fn test_clients_list_newest_first_with_case_summaries() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin(&mut persistence);
    let case_type = create_test_case_type(&mut persistence, &admin, "Civil", Some("CIV"));
    let older = create_test_client(&mut persistence, "Older Client");
    let newer = create_test_client(&mut persistence, "Newer Client");

    let mut request = create_test_case_request("Contract dispute", Some(case_type.id));
    request.client_id = Some(older.id);
    let case = create_case(&mut persistence, &request).unwrap();

    let clients = list_clients(&mut persistence).unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].id, newer.id);
    assert_eq!(clients[1].id, older.id);
    assert!(clients[0].cases.is_empty());
    assert_eq!(clients[1].cases.len(), 1);
    assert_eq!(clients[1].cases[0].id, case.id);
    assert_eq!(clients[1].cases[0].case_number, case.case_number);
}

#[test]
fn test_update_client_changes_only_given_fields() {
    let mut persistence = create_test_persistence();
    let client = create_client(
        &mut persistence,
        &CreateClientRequest {
            name: String::from("TechCorp Ltd."),
            email: Some(String::from("contact@techcorp.example")),
            phone: Some(String::from("+1 555 0199")),
            address: None,
            status: None,
        },
    )
    .unwrap();

    let updated = update_client(
        &mut persistence,
        client.id,
        &UpdateClientRequest {
            status: Some(String::from("Inactive")),
            address: Some(String::from("789 Business Blvd")),
            ..UpdateClientRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "TechCorp Ltd.");
    assert_eq!(updated.status, "inactive");
    assert_eq!(updated.phone.as_deref(), Some("+1 555 0199"));
    assert_eq!(updated.address.as_deref(), Some("789 Business Blvd"));
}

#[test]
fn test_missing_client_is_not_found() {
    let mut persistence = create_test_persistence();

    assert!(matches!(
        get_client(&mut persistence, 42),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        update_client(&mut persistence, 42, &UpdateClientRequest::default()),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        delete_client(&mut persistence, 42),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        list_client_cases(&mut persistence, 42),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_deleting_client_removes_its_cases() {
    let mut persistence = create_test_persistence();
    let client = create_test_client(&mut persistence, "Robert Miller");
    let mut request = create_test_case_request("Estate planning", None);
    request.client_id = Some(client.id);
    let case = create_case(&mut persistence, &request).unwrap();

    delete_client(&mut persistence, client.id).unwrap();

    assert!(matches!(
        get_case(&mut persistence, case.id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_client_cases_carry_document_and_reminder_counts() {
    let mut persistence = create_test_persistence();
    let admin = create_test_admin(&mut persistence);
    let case_type = create_test_case_type(&mut persistence, &admin, "Personal Injury", None);
    let client = create_test_client(&mut persistence, "Sarah Johnson");

    let mut first = create_test_case_request("Slip and fall", Some(case_type.id));
    first.client_id = Some(client.id);
    let first = create_case(&mut persistence, &first).unwrap();
    let mut second = create_test_case_request("Car accident", Some(case_type.id));
    second.client_id = Some(client.id);
    let second = create_case(&mut persistence, &second).unwrap();

    for title in ["Medical records", "Police report"] {
        create_document(
            &mut persistence,
            &CreateDocumentRequest {
                case_id: first.id,
                title: title.to_string(),
                file: format!("uploads/{title}.pdf"),
            },
        )
        .unwrap();
    }
    create_reminder(
        &mut persistence,
        &CreateReminderRequest {
            title: String::from("Court hearing"),
            due_date: String::from("2026-05-01T09:00:00Z"),
            case_id: Some(first.id),
            ..CreateReminderRequest::default()
        },
    )
    .unwrap();

    let cases = list_client_cases(&mut persistence, client.id).unwrap();

    assert_eq!(cases.len(), 2);
    let first_view = cases.iter().find(|c| c.case.id == first.id).unwrap();
    let second_view = cases.iter().find(|c| c.case.id == second.id).unwrap();
    assert_eq!(first_view.document_count, 2);
    assert_eq!(first_view.reminder_count, 1);
    assert_eq!(second_view.document_count, 0);
    assert_eq!(second_view.reminder_count, 0);
    assert_eq!(
        first_view.case.client.as_ref().map(|c| c.name.as_str()),
        Some("Sarah Johnson")
    );
    assert_eq!(
        first_view.case.type_details.as_ref().map(|t| t.type_code.as_str()),
        Some("PI")
    );
}
