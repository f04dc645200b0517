// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `users` - users and sessions
//! - `clients` - clients
//! - `case_types` - case types
//! - `cases` - cases, including case number allocation
//! - `documents` - case document metadata
//! - `reminders` - reminders

pub mod case_types;
pub mod cases;
pub mod clients;
pub mod documents;
pub mod reminders;
pub mod users;

pub use cases::CreatedCase;
