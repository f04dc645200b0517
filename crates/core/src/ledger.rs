// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Read and write access to the case history that case numbering depends on.
///
/// Implementations run inside the transaction that will also insert the new
/// case, so every count observes the same snapshot the insert commits into.
pub trait CaseNumberLedger {
    /// Error type of the backing store.
    type Error;

    /// Counts cases of `case_type_id` whose creation timestamp falls in `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn count_cases_in_year(&mut self, case_type_id: i64, year: i32) -> Result<u64, Self::Error>;

    /// Counts cases of `case_type_id` whose case number contains `fragment`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn count_case_numbers_containing(
        &mut self,
        case_type_id: i64,
        fragment: &str,
    ) -> Result<u64, Self::Error>;

    /// Reports whether any case already carries `case_number`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn case_number_taken(&mut self, case_number: &str) -> Result<bool, Self::Error>;

    /// Loads the last sequence handed out for `(case_type_id, year)`.
    ///
    /// Returns `None` when no counter has been stored for the key yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load_counter(&mut self, case_type_id: i64, year: i32) -> Result<Option<u64>, Self::Error>;

    /// Stores `last_sequence` as the last sequence for `(case_type_id, year)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn store_counter(
        &mut self,
        case_type_id: i64,
        year: i32,
        last_sequence: u64,
    ) -> Result<(), Self::Error>;
}
