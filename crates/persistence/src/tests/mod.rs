// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use time::{OffsetDateTime, macros::datetime};
use timesheet_audit::{Action, Actor, AuditEvent, actions};
use timesheet_domain::{
    Hours, Identity, Role, Timesheet, TimesheetRow, TimesheetStatus, TimesheetWeek, WeekdayHours,
};

use crate::Persistence;

pub fn now() -> OffsetDateTime {
    datetime!(2025-08-04 09:00 UTC)
}

pub fn later() -> OffsetDateTime {
    datetime!(2025-08-08 17:30:15 UTC)
}

pub fn week(year: u16, week: u8) -> TimesheetWeek {
    TimesheetWeek::new(year, week).unwrap()
}

pub fn row(task: &str, notes: Option<&str>, days: [u32; 7]) -> TimesheetRow {
    let hours: WeekdayHours = WeekdayHours::from_days(days.map(Hours::from_hundredths)).unwrap();
    TimesheetRow::new(task, notes, hours).unwrap()
}

/// Opens a fresh database with one registered user of the given role.
pub fn db_with_user(role: Role, rank: Option<u16>) -> (Persistence, Identity) {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = db.create_user("pat", role, rank).unwrap();
    (db, Identity::new(user_id, role, rank))
}

pub fn create_event(identity: &Identity, after: TimesheetStatus) -> AuditEvent {
    AuditEvent::new(
        Actor::from(identity),
        Action::new(actions::CREATE_TIMESHEET, None),
        None,
        None,
        after,
        now(),
    )
}

/// An owner update from `before` to `after`, recorded at [`later`].
pub fn update_event(
    identity: &Identity,
    before: TimesheetStatus,
    after: TimesheetStatus,
) -> AuditEvent {
    AuditEvent::new(
        Actor::from(identity),
        Action::new(actions::UPDATE_TIMESHEET, None),
        None,
        Some(before),
        after,
        later(),
    )
}

pub fn draft(identity: &Identity, w: TimesheetWeek, rows: Vec<TimesheetRow>) -> Timesheet {
    let mut timesheet: Timesheet = Timesheet::new_draft(identity.as_owner(), w, now());
    timesheet.replace_rows(rows);
    timesheet
}
