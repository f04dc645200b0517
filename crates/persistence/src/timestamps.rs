// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use legalflow_domain::format_timestamp;
use time::OffsetDateTime;

use crate::error::PersistenceError;

/// Formats `instant` the way every timestamp column stores it.
pub fn stored(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(format_timestamp(instant)?)
}

/// The current instant in stored form.
pub fn now() -> Result<String, PersistenceError> {
    stored(OffsetDateTime::now_utc())
}
