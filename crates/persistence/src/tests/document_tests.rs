// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_instant, create_test_new_case, create_test_persistence};
use crate::NewCaseDocument;
use crate::error::PersistenceError;

#[test]
fn test_documents_belong_to_case() {
    let mut persistence = create_test_persistence();
    let case_id = persistence
        .create_case_at(&create_test_new_case("Documented", None), create_test_instant())
        .unwrap()
        .case_id;

    let document_id = persistence
        .create_document(&NewCaseDocument {
            case_id,
            title: String::from("Retainer"),
            file: String::from("uploads/retainer.pdf"),
        })
        .unwrap();

    let document = persistence.get_document(document_id).unwrap().unwrap();
    assert_eq!(document.case_id, case_id);
    assert_eq!(document.file, "uploads/retainer.pdf");
    assert_eq!(persistence.list_documents_for_case(case_id).unwrap().len(), 1);
}

#[test]
fn test_document_for_missing_case_is_invalid_reference() {
    let mut persistence = create_test_persistence();
    let result = persistence.create_document(&NewCaseDocument {
        case_id: 404,
        title: String::from("Lost"),
        file: String::from("uploads/lost.pdf"),
    });
    assert!(matches!(result, Err(PersistenceError::InvalidReference(_))));
}

#[test]
fn test_documents_are_removed_with_their_case() {
    let mut persistence = create_test_persistence();
    let case_id = persistence
        .create_case_at(&create_test_new_case("Cascade", None), create_test_instant())
        .unwrap()
        .case_id;
    let document_id = persistence
        .create_document(&NewCaseDocument {
            case_id,
            title: String::from("Brief"),
            file: String::from("uploads/brief.pdf"),
        })
        .unwrap();

    persistence.delete_case(case_id).unwrap();

    assert!(persistence.get_document(document_id).unwrap().is_none());
}

#[test]
fn test_delete_document() {
    let mut persistence = create_test_persistence();
    let case_id = persistence
        .create_case_at(&create_test_new_case("Trimmed", None), create_test_instant())
        .unwrap()
        .case_id;
    let document_id = persistence
        .create_document(&NewCaseDocument {
            case_id,
            title: String::from("Draft"),
            file: String::from("uploads/draft.docx"),
        })
        .unwrap();

    persistence.delete_document(document_id).unwrap();
    assert!(matches!(
        persistence.delete_document(document_id),
        Err(PersistenceError::NotFound(_))
    ));
}
