// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timesheet_audit::AuditEvent;

use crate::conversions::audit_event_from_row;
use crate::data_models::AuditEventRow;
use crate::diesel_schema::timesheet_audit_events;
use crate::error::PersistenceError;

/// Lists a timesheet's audit events in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_status_history(
    conn: &mut SqliteConnection,
    timesheet_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    timesheet_audit_events::table
        .filter(timesheet_audit_events::timesheet_id.eq(timesheet_id))
        .order(timesheet_audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_status_history: {e}")))?
        .into_iter()
        .map(audit_event_from_row)
        .collect()
}

/// Counts all stored audit events.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_audit_events(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    timesheet_audit_events::table
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_audit_events: {e}")))
}
