// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AllocationMode, CaseNumberLedger, CoreError, allocate_case_number};
use legalflow_domain::CaseType;
use std::collections::HashMap;

#[derive(Debug, PartialEq, Eq)]
pub enum FakeLedgerError {
    Core(CoreError),
}

impl From<CoreError> for FakeLedgerError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

#[derive(Debug, Clone)]
pub struct FakeCase {
    pub case_type_id: i64,
    pub created_year: i32,
    pub case_number: Option<String>,
}

/// In-memory stand-in for the cases and counters tables.
#[derive(Debug, Default)]
pub struct FakeLedger {
    pub cases: Vec<FakeCase>,
    pub counters: HashMap<(i64, i32), u64>,
    pub primary_counts: usize,
    pub fallback_counts: usize,
}

impl CaseNumberLedger for FakeLedger {
    type Error = FakeLedgerError;

    fn count_cases_in_year(&mut self, case_type_id: i64, year: i32) -> Result<u64, Self::Error> {
        self.primary_counts += 1;
        Ok(self
            .cases
            .iter()
            .filter(|c| c.case_type_id == case_type_id && c.created_year == year)
            .count() as u64)
    }

    fn count_case_numbers_containing(
        &mut self,
        case_type_id: i64,
        fragment: &str,
    ) -> Result<u64, Self::Error> {
        self.fallback_counts += 1;
        Ok(self
            .cases
            .iter()
            .filter(|c| {
                c.case_type_id == case_type_id
                    && c.case_number.as_deref().is_some_and(|n| n.contains(fragment))
            })
            .count() as u64)
    }

    fn case_number_taken(&mut self, case_number: &str) -> Result<bool, Self::Error> {
        Ok(self
            .cases
            .iter()
            .any(|c| c.case_number.as_deref() == Some(case_number)))
    }

    fn load_counter(&mut self, case_type_id: i64, year: i32) -> Result<Option<u64>, Self::Error> {
        Ok(self.counters.get(&(case_type_id, year)).copied())
    }

    fn store_counter(
        &mut self,
        case_type_id: i64,
        year: i32,
        last_sequence: u64,
    ) -> Result<(), Self::Error> {
        self.counters.insert((case_type_id, year), last_sequence);
        Ok(())
    }
}

impl FakeLedger {
    /// Allocates a number and records the case, as the case-create use case does.
    pub fn create_case(&mut self, case_type: &CaseType, year: i32, mode: AllocationMode) -> String {
        let number: String = allocate_case_number(self, case_type, year, mode)
            .unwrap()
            .to_string();
        self.cases.push(FakeCase {
            case_type_id: case_type.case_type_id().unwrap(),
            created_year: year,
            case_number: Some(number.clone()),
        });
        number
    }

    /// Records an imported case whose creation year does not match its number.
    pub fn import_case(&mut self, case_type_id: i64, created_year: i32, case_number: &str) {
        self.cases.push(FakeCase {
            case_type_id,
            created_year,
            case_number: Some(case_number.to_string()),
        });
    }

    pub fn delete_case(&mut self, case_number: &str) {
        self.cases
            .retain(|c| c.case_number.as_deref() != Some(case_number));
    }
}

pub fn personal_injury() -> CaseType {
    CaseType::with_id(1, "Personal Injury", None)
}

pub fn civil_law() -> CaseType {
    CaseType::with_id(2, "Civil Law", Some("CIV"))
}
