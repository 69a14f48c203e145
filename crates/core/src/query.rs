// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only operations. None of these produce audit events.

use timesheet_audit::AuditEvent;
use timesheet_domain::{Identity, Role, Timesheet, is_owner_or_can_view};

use crate::error::CoreError;
use crate::store::{ReviewEntry, ReviewFilter, TimesheetStore};

/// Lists the caller's own timesheets, newest week first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_mine<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    year: Option<u16>,
    week: Option<u8>,
) -> Result<Vec<Timesheet>, CoreError> {
    Ok(store.list_by_owner(identity.user_id(), year, week)?)
}

/// Lists every timesheet the caller may view, newest week first.
///
/// # Errors
///
/// Returns an error if the caller is a worker or the store fails.
pub fn review<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    filter: &ReviewFilter,
) -> Result<Vec<ReviewEntry>, CoreError> {
    if identity.role() == Role::Worker {
        return Err(CoreError::Forbidden(String::from(
            "Workers cannot review timesheets",
        )));
    }

    let mut entries: Vec<ReviewEntry> = store.list_all(identity, filter)?;

    entries.sort_by(|a, b| b.timesheet.week.cmp(&a.timesheet.week));
    Ok(entries)
}

/// Returns the audit trail of a timesheet, oldest first.
///
/// Available to the owner and to anyone who may view the owner's
/// timesheets.
///
/// # Errors
///
/// Returns an error if the timesheet does not exist, the caller may not
/// view it, or the store fails.
pub fn status_history<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    timesheet_id: i64,
) -> Result<Vec<AuditEvent>, CoreError> {
    let Some(timesheet) = store.find_by_id(timesheet_id)? else {
        return Err(CoreError::NotFound(format!("Timesheet {timesheet_id}")));
    };

    if !is_owner_or_can_view(identity, &timesheet.owner) {
        return Err(CoreError::Forbidden(format!(
            "Not permitted to view timesheet {timesheet_id}"
        )));
    }

    Ok(store.list_status_history(timesheet_id)?)
}
