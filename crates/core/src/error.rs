// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use legalflow_domain::DomainError;

/// Errors raised by the case numbering policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The case type has no database identifier, so its cases cannot be counted.
    CaseTypeNotPersisted {
        /// Name of the offending case type.
        name: String,
    },
    /// Neither an explicit code nor the name yields a usable code.
    EmptyTypeCode {
        /// Name of the offending case type.
        name: String,
    },
    /// Every sequence after the proposed one is already stored.
    SequenceExhausted {
        /// Case type code of the exhausted series.
        code: String,
        /// Year of the exhausted series.
        year: i32,
    },
    /// An allocation mode string was not recognised.
    UnknownAllocationMode(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::CaseTypeNotPersisted { name } => {
                write!(f, "Case type '{name}' has not been persisted")
            }
            Self::EmptyTypeCode { name } => {
                write!(f, "Case type '{name}' does not yield a case number code")
            }
            Self::SequenceExhausted { code, year } => {
                write!(f, "No free case number left for {code}/{year}")
            }
            Self::UnknownAllocationMode(mode) => write!(
                f,
                "Unknown allocation mode '{mode}'. Must be one of: derived, counter"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
