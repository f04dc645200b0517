// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use legalflow::CaseNumberLedger;

use crate::diesel_schema::case_number_counters;
use crate::error::PersistenceError;
use crate::queries::cases;

/// Case numbering ledger over an open `SQLite` connection.
///
/// Callers hold a transaction on `conn` for as long as the ledger is used.
pub struct SqliteLedger<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteLedger<'a> {
    pub const fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl CaseNumberLedger for SqliteLedger<'_> {
    type Error = PersistenceError;

    fn count_cases_in_year(&mut self, case_type_id: i64, year: i32) -> Result<u64, Self::Error> {
        cases::count_cases_created_in_year(self.conn, case_type_id, year)
    }

    fn count_case_numbers_containing(
        &mut self,
        case_type_id: i64,
        fragment: &str,
    ) -> Result<u64, Self::Error> {
        cases::count_case_numbers_containing(self.conn, case_type_id, fragment)
    }

    fn case_number_taken(&mut self, case_number: &str) -> Result<bool, Self::Error> {
        Ok(cases::get_case_by_number(self.conn, case_number)?.is_some())
    }

    fn load_counter(&mut self, case_type_id: i64, year: i32) -> Result<Option<u64>, Self::Error> {
        cases::get_case_number_counter(self.conn, case_type_id, year)
    }

    fn store_counter(
        &mut self,
        case_type_id: i64,
        year: i32,
        last_sequence: u64,
    ) -> Result<(), Self::Error> {
        let last_sequence: i64 = i64::try_from(last_sequence).map_err(|_| {
            PersistenceError::Other(format!(
                "Case number sequence {last_sequence} exceeds storage range"
            ))
        })?;

        diesel::insert_into(case_number_counters::table)
            .values((
                case_number_counters::case_type_id.eq(case_type_id),
                case_number_counters::year.eq(year),
                case_number_counters::last_sequence.eq(last_sequence),
            ))
            .on_conflict((case_number_counters::case_type_id, case_number_counters::year))
            .do_update()
            .set(case_number_counters::last_sequence.eq(last_sequence))
            .execute(self.conn)?;

        Ok(())
    }
}
