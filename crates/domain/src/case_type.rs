// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A classification of legal cases (e.g. "Personal Injury").
///
/// The case type supplies the leading code of every case number allocated
/// for it. When no explicit code is configured the code is derived from the
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseType {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the case type has not been persisted yet.
    case_type_id: Option<i64>,
    /// Human readable, unique name.
    name: String,
    /// Optional short mnemonic.
    code: Option<String>,
}

impl CaseType {
    /// Creates a new `CaseType` without a persisted ID.
    #[must_use]
    pub fn new(name: &str, code: Option<&str>) -> Self {
        Self {
            case_type_id: None,
            name: name.to_string(),
            code: code.map(str::to_string),
        }
    }

    /// Creates a `CaseType` loaded from the database.
    #[must_use]
    pub fn with_id(case_type_id: i64, name: &str, code: Option<&str>) -> Self {
        Self {
            case_type_id: Some(case_type_id),
            name: name.to_string(),
            code: code.map(str::to_string),
        }
    }

    #[must_use]
    pub const fn case_type_id(&self) -> Option<i64> {
        self.case_type_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the code used as the first segment of case numbers.
    ///
    /// A non-empty explicit code is used verbatim. Otherwise the code is
    /// derived from the name with [`derive_type_code`].
    #[must_use]
    pub fn type_code(&self) -> String {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => derive_type_code(&self.name),
        }
    }
}

/// Derives a case type code from a name: the uppercased first letter of
/// every whitespace-separated word.
///
/// "Personal Injury" becomes "PI"; "Criminal" becomes "C". A name made of
/// whitespace only yields an empty code.
#[must_use]
pub fn derive_type_code(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
