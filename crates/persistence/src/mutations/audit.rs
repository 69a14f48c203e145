// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timesheet_audit::AuditEvent;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::conversions::format_timestamp;
use crate::diesel_schema::timesheet_audit_events;
use crate::error::PersistenceError;

/// Inserts an audit event bound to `timesheet_id`.
///
/// Any id already carried by `event` is ignored.
///
/// # Returns
///
/// The event id assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    timesheet_id: i64,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(timesheet_audit_events::table)
        .values((
            timesheet_audit_events::timesheet_id.eq(timesheet_id),
            timesheet_audit_events::actor_user_id.eq(event.actor.user_id),
            timesheet_audit_events::actor_role.eq(event.actor.role.as_str()),
            timesheet_audit_events::action_name.eq(&event.action.name),
            timesheet_audit_events::action_details.eq(event.action.details.as_deref()),
            timesheet_audit_events::reason.eq(event.cause.as_ref().map(|c| c.reason.as_str())),
            timesheet_audit_events::before_status.eq(event.before.map(|s| s.as_str())),
            timesheet_audit_events::after_status.eq(event.after.as_str()),
            timesheet_audit_events::recorded_at.eq(format_timestamp(event.recorded_at)?),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;
    debug!(event_id, timesheet_id, action = %event.action.name, "Persisted audit event");
    Ok(event_id)
}
