// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// An allocated case number of the form `{CODE}/{YEAR}/{SEQ}`.
///
/// The sequence is zero padded to three digits and widens past 999.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseNumber {
    code: String,
    year: i32,
    sequence: u64,
}

impl CaseNumber {
    #[must_use]
    pub fn new(code: &str, year: i32, sequence: u64) -> Self {
        Self {
            code: code.to_string(),
            year,
            sequence,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl std::fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{:04}/{:03}", self.code, self.year, self.sequence)
    }
}

/// The substring every case number allocated in `year` contains.
#[must_use]
pub fn year_fragment(year: i32) -> String {
    format!("/{year:04}/")
}
