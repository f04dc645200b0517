// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{FakeLedger, personal_injury};
use crate::{AllocationMode, resolve_case_number};

#[test]
fn test_explicit_number_is_used_verbatim() {
    let mut ledger: FakeLedger = FakeLedger::default();
    let resolved: Option<String> = resolve_case_number(
        &mut ledger,
        Some("LEGACY-17"),
        Some(&personal_injury()),
        2025,
        AllocationMode::Counter,
    )
    .unwrap();

    assert_eq!(resolved.as_deref(), Some("LEGACY-17"));
    assert_eq!(ledger.primary_counts, 0);
    assert!(ledger.counters.is_empty());
}

#[test]
fn test_empty_explicit_number_is_treated_as_absent() {
    let mut ledger: FakeLedger = FakeLedger::default();
    let resolved: Option<String> = resolve_case_number(
        &mut ledger,
        Some(""),
        Some(&personal_injury()),
        2025,
        AllocationMode::Derived,
    )
    .unwrap();

    assert_eq!(resolved.as_deref(), Some("PI/2025/001"));
}

#[test]
fn test_no_case_type_and_no_number_stays_empty() {
    let mut ledger: FakeLedger = FakeLedger::default();
    let resolved: Option<String> =
        resolve_case_number(&mut ledger, None, None, 2025, AllocationMode::Counter).unwrap();

    assert_eq!(resolved, None);
    assert_eq!(ledger.primary_counts, 0);
}
