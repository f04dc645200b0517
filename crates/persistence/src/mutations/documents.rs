// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewCaseDocument;
use crate::diesel_schema::{case_documents, cases};
use crate::error::PersistenceError;
use crate::timestamps;

/// Records document metadata against a case.
///
/// # Errors
///
/// Returns `InvalidReference` if the case does not exist.
pub fn create_document(
    conn: &mut SqliteConnection,
    document: &NewCaseDocument,
) -> Result<i64, PersistenceError> {
    let case_exists: i64 = cases::table
        .filter(cases::case_id.eq(document.case_id))
        .count()
        .get_result(conn)?;
    if case_exists == 0 {
        return Err(PersistenceError::InvalidReference(format!(
            "Case {} does not exist",
            document.case_id
        )));
    }

    let uploaded_at: String = timestamps::now()?;
    diesel::insert_into(case_documents::table)
        .values((
            case_documents::case_id.eq(document.case_id),
            case_documents::title.eq(&document.title),
            case_documents::file.eq(&document.file),
            case_documents::uploaded_at.eq(&uploaded_at),
        ))
        .execute(conn)?;

    let document_id: i64 = get_last_insert_rowid(conn)?;
    info!(document_id, case_id = document.case_id, "Case document recorded");
    Ok(document_id)
}

/// Deletes a document record.
///
/// # Errors
///
/// Returns `NotFound` if the document does not exist.
pub fn delete_document(conn: &mut SqliteConnection, document_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(case_documents::table)
        .filter(case_documents::document_id.eq(document_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Document {document_id} not found"
        )));
    }
    info!(document_id, "Case document deleted");
    Ok(())
}
