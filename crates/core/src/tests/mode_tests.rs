// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeLedger, civil_law, personal_injury};
use crate::{AllocationMode, CoreError};
use std::str::FromStr;

#[test]
fn test_mode_parsing() {
    assert_eq!(
        AllocationMode::from_str("derived").unwrap(),
        AllocationMode::Derived
    );
    assert_eq!(
        AllocationMode::from_str("Counter").unwrap(),
        AllocationMode::Counter
    );
    assert!(matches!(
        AllocationMode::from_str("random"),
        Err(CoreError::UnknownAllocationMode(_))
    ));
    assert_eq!(AllocationMode::default(), AllocationMode::Counter);
    assert!(AllocationMode::Counter.requires_write_lock());
    assert!(!AllocationMode::Derived.requires_write_lock());
}

#[test]
fn test_modes_agree_on_undisturbed_history() {
    let mut derived: FakeLedger = FakeLedger::default();
    let mut counter: FakeLedger = FakeLedger::default();

    let plan = [
        (personal_injury(), 2024),
        (personal_injury(), 2025),
        (civil_law(), 2025),
        (personal_injury(), 2025),
        (civil_law(), 2025),
        (personal_injury(), 2024),
    ];

    for (case_type, year) in &plan {
        let a: String = derived.create_case(case_type, *year, AllocationMode::Derived);
        let b: String = counter.create_case(case_type, *year, AllocationMode::Counter);
        assert_eq!(a, b);
    }
}

#[test]
fn test_derived_mode_skips_surviving_number_after_deletion() {
    let mut ledger: FakeLedger = FakeLedger::default();
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived);
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived);
    ledger.delete_case("PI/2025/001");

    // One case left, so the count proposes 002, which is still stored.
    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived),
        "PI/2025/003"
    );
    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived),
        "PI/2025/004"
    );
}

#[test]
fn test_derived_mode_reuses_last_number_after_its_deletion() {
    let mut ledger: FakeLedger = FakeLedger::default();
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived);
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived);
    ledger.delete_case("PI/2025/002");

    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived),
        "PI/2025/002"
    );
}

#[test]
fn test_counter_mode_never_reuses_number_after_deletion() {
    let mut ledger: FakeLedger = FakeLedger::default();
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter);
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter);
    ledger.delete_case("PI/2025/002");

    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter),
        "PI/2025/003"
    );
}

#[test]
fn test_counter_seeded_from_existing_history() {
    let mut ledger: FakeLedger = FakeLedger::default();
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived);
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Derived);
    assert!(ledger.counters.is_empty());

    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter),
        "PI/2025/003"
    );
    assert_eq!(ledger.counters.get(&(1, 2025)), Some(&3));
}

#[test]
fn test_counter_does_not_recount_once_seeded() {
    let mut ledger: FakeLedger = FakeLedger::default();
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter);
    let primary_after_seed: usize = ledger.primary_counts;

    ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter);
    assert_eq!(ledger.primary_counts, primary_after_seed);
}

#[test]
fn test_counter_skips_hand_entered_number_and_stores_it() {
    let mut ledger: FakeLedger = FakeLedger::default();
    ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter);
    // Untyped case entered by hand just ahead of the counter.
    ledger.import_case(0, 2025, "PI/2025/002");

    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter),
        "PI/2025/003"
    );
    assert_eq!(ledger.counters.get(&(1, 2025)), Some(&3));
    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter),
        "PI/2025/004"
    );
}

#[test]
fn test_counter_skips_a_run_of_taken_numbers() {
    let mut ledger: FakeLedger = FakeLedger::default();
    ledger.counters.insert((1, 2025), 4);
    for number in ["PI/2025/005", "PI/2025/006", "PI/2025/007"] {
        ledger.import_case(0, 2025, number);
    }

    assert_eq!(
        ledger.create_case(&personal_injury(), 2025, AllocationMode::Counter),
        "PI/2025/008"
    );
    assert_eq!(ledger.counters.get(&(1, 2025)), Some(&8));
}
