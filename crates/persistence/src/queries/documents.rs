// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::CaseDocumentData;
use crate::diesel_schema::case_documents;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = case_documents)]
struct CaseDocumentRow {
    document_id: i64,
    case_id: i64,
    title: String,
    file: String,
    uploaded_at: String,
}

impl From<CaseDocumentRow> for CaseDocumentData {
    fn from(row: CaseDocumentRow) -> Self {
        Self {
            document_id: row.document_id,
            case_id: row.case_id,
            title: row.title,
            file: row.file,
            uploaded_at: row.uploaded_at,
        }
    }
}

/// Retrieves a document record by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_document(
    conn: &mut SqliteConnection,
    document_id: i64,
) -> Result<Option<CaseDocumentData>, PersistenceError> {
    let row: Option<CaseDocumentRow> = case_documents::table
        .filter(case_documents::document_id.eq(document_id))
        .select(CaseDocumentRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(CaseDocumentData::from))
}

/// Lists the documents of a case, most recently uploaded first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_documents_for_case(
    conn: &mut SqliteConnection,
    case_id: i64,
) -> Result<Vec<CaseDocumentData>, PersistenceError> {
    let rows: Vec<CaseDocumentRow> = case_documents::table
        .filter(case_documents::case_id.eq(case_id))
        .order((
            case_documents::uploaded_at.desc(),
            case_documents::document_id.desc(),
        ))
        .select(CaseDocumentRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(CaseDocumentData::from).collect())
}
