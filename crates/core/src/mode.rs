// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use std::str::FromStr;

/// How the next sequence of a case number is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AllocationMode {
    /// Sequence is one more than the number of matching cases already stored.
    ///
    /// Deleting a case lowers the count, so a later allocation can repeat a
    /// number that was already handed out.
    Derived,
    /// Sequence comes from a per `(case type, year)` counter that only grows.
    ///
    /// The counter is seeded from the derived count the first time a key is
    /// used, so both modes agree on an undisturbed history.
    #[default]
    Counter,
}

impl FromStr for AllocationMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "derived" => Ok(Self::Derived),
            "counter" => Ok(Self::Counter),
            _ => Err(CoreError::UnknownAllocationMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AllocationMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Derived => "derived",
            Self::Counter => "counter",
        }
    }

    /// Returns whether allocation must hold the write lock before counting.
    #[must_use]
    pub const fn requires_write_lock(&self) -> bool {
        matches!(self, Self::Counter)
    }
}
