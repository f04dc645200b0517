// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use legalflow_domain::CaseStatus;

use crate::data_models::DashboardStats;
use crate::error::PersistenceError;
use crate::queries::{cases, clients, reminders};

/// Computes the dashboard counters.
///
/// # Errors
///
/// Returns an error if any count fails.
pub fn dashboard_stats(conn: &mut SqliteConnection) -> Result<DashboardStats, PersistenceError> {
    Ok(DashboardStats {
        total_cases: cases::count_cases(conn)?.unsigned_abs(),
        active_cases: cases::count_cases_with_status(conn, CaseStatus::Active.as_str())?
            .unsigned_abs(),
        total_clients: clients::count_clients(conn)?.unsigned_abs(),
        pending_reminders: reminders::count_pending_reminders(conn)?.unsigned_abs(),
    })
}
