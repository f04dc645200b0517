// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `users` - users, sessions and password verification
//! - `clients` - clients and their case summaries
//! - `case_types` - case types and reference counts
//! - `cases` - cases, enriched case views and numbering counts
//! - `documents` - case document metadata
//! - `reminders` - reminders
//! - `dashboard` - aggregate counters

pub mod case_types;
pub mod cases;
pub mod clients;
pub mod dashboard;
pub mod documents;
pub mod reminders;
pub mod users;
