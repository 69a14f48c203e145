// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status transitions: owner edits and submits, reviews, and admin overrides.

use time::OffsetDateTime;
use timesheet_audit::{Action, Actor, AuditEvent, Cause, actions};
use timesheet_domain::{
    Identity, Role, Timesheet, TimesheetRow, TimesheetStatus, TimesheetWeek, can_act_on,
};

use crate::config::WorkflowConfig;
use crate::error::CoreError;
use crate::store::TimesheetStore;

/// An owner's full snapshot of a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertTimesheet {
    /// The week being edited.
    pub week: TimesheetWeek,
    /// The complete new row set, in display order.
    pub rows: Vec<TimesheetRow>,
    /// Status to set, if any. Only Draft and Submitted are accepted.
    pub requested_status: Option<TimesheetStatus>,
}

/// Creates or replaces the caller's timesheet for a week.
///
/// The timesheet is created in Draft on first edit. Every call replaces
/// the entire row set; rows are never merged.
///
/// If the store reports that the timesheet changed after it was read (a
/// concurrent create of the same week, or a status change by a reviewer),
/// the whole edit is re-run once against the fresh state, so the edit
/// policy and the recorded before-status always reflect what is stored.
///
/// # Arguments
///
/// * `store` - The timesheet store
/// * `identity` - The owner
/// * `config` - Workflow configuration (edit policy)
/// * `request` - The new snapshot
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - `requested_status` is Approved or Declined (`Forbidden`)
/// - The edit policy locks the current status (`InvalidState`)
/// - The timesheet kept changing underneath the edit (`Conflict`)
/// - The store fails
pub fn upsert_mine<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    config: &WorkflowConfig,
    request: UpsertTimesheet,
    now: OffsetDateTime,
) -> Result<Timesheet, CoreError> {
    if let Some(status) = request
        .requested_status
        .filter(|s| !s.is_owner_requestable())
    {
        return Err(CoreError::Forbidden(format!(
            "Owners cannot set status {status}"
        )));
    }

    match upsert_once(store, identity, config, &request, now) {
        Err(CoreError::Conflict(_)) => upsert_once(store, identity, config, &request, now),
        result => result,
    }
}

/// One read-check-write pass of [`upsert_mine`].
fn upsert_once<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    config: &WorkflowConfig,
    request: &UpsertTimesheet,
    now: OffsetDateTime,
) -> Result<Timesheet, CoreError> {
    let week: TimesheetWeek = request.week;
    let existing: Option<Timesheet> = store.find_by_owner_and_week(identity.user_id(), week)?;
    let (mut timesheet, before) = match existing {
        Some(timesheet) => {
            if !config.edit_policy.allows_owner_edit(timesheet.status) {
                return Err(CoreError::InvalidState(format!(
                    "Cannot edit {} timesheet",
                    timesheet.status.as_str().to_lowercase()
                )));
            }
            let before: TimesheetStatus = timesheet.status;
            (timesheet, Some(before))
        }
        None => (
            Timesheet::new_draft(identity.as_owner(), week, now),
            None,
        ),
    };

    timesheet.replace_rows(request.rows.clone());
    if let Some(status) = request.requested_status {
        timesheet.status = status;
    }
    timesheet.touch(now);

    let name: &str = if before.is_some() {
        actions::UPDATE_TIMESHEET
    } else {
        actions::CREATE_TIMESHEET
    };
    let action: Action = Action::new(
        name,
        Some(format!(
            "{} rows, {} hours for {week}",
            timesheet.rows.len(),
            timesheet.total_hours()
        )),
    );
    let event: AuditEvent = AuditEvent::new(
        Actor::from(identity),
        action,
        None,
        before,
        timesheet.status,
        now,
    );

    Ok(store.save(&timesheet, &event)?)
}

/// Submits the caller's timesheet for a week.
///
/// Submit never creates a timesheet. Submitting an already submitted
/// timesheet is accepted and leaves it Submitted. Declined timesheets may
/// be resubmitted.
///
/// # Errors
///
/// Returns an error if:
/// - The caller has no timesheet for `week` (`NotFound`)
/// - The timesheet is Approved (`InvalidState`)
/// - Its status changed after it was read (`Conflict`)
/// - The store fails
pub fn submit_mine<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    week: TimesheetWeek,
    now: OffsetDateTime,
) -> Result<Timesheet, CoreError> {
    let Some(mut timesheet) = store.find_by_owner_and_week(identity.user_id(), week)? else {
        return Err(CoreError::NotFound(format!("No timesheet for {week}")));
    };

    if !timesheet.status.allows_submit() {
        return Err(CoreError::InvalidState(format!(
            "Cannot submit {} timesheet",
            timesheet.status.as_str().to_lowercase()
        )));
    }

    let before: TimesheetStatus = timesheet.status;
    timesheet.set_status(TimesheetStatus::Submitted, now);

    let event: AuditEvent = AuditEvent::new(
        Actor::from(identity),
        Action::new(actions::SUBMIT_TIMESHEET, None),
        None,
        Some(before),
        timesheet.status,
        now,
    );

    Ok(store.save(&timesheet, &event)?)
}

/// Approves or declines a timesheet.
///
/// A decline reason, when given, is recorded on the audit event.
///
/// # Arguments
///
/// * `store` - The timesheet store
/// * `identity` - The reviewer
/// * `timesheet_id` - The timesheet to review
/// * `approve` - `true` to approve, `false` to decline
/// * `reason` - Optional free-text reason
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if:
/// - The caller is a worker (`Forbidden`)
/// - The timesheet does not exist (`NotFound`)
/// - The caller may not act on the owner's role and rank (`Forbidden`)
/// - The timesheet is not Draft or Submitted (`InvalidState`)
/// - Its status changed after it was read (`Conflict`)
/// - The store fails
pub fn review_action<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    timesheet_id: i64,
    approve: bool,
    reason: Option<&str>,
    now: OffsetDateTime,
) -> Result<Timesheet, CoreError> {
    if identity.role() == Role::Worker {
        return Err(CoreError::Forbidden(String::from(
            "Workers cannot review timesheets",
        )));
    }

    let Some(mut timesheet) = store.find_by_id(timesheet_id)? else {
        return Err(CoreError::NotFound(format!("Timesheet {timesheet_id}")));
    };

    if !can_act_on(identity, timesheet.owner.role, timesheet.owner.rank) {
        return Err(CoreError::Forbidden(format!(
            "Not permitted to review timesheet {timesheet_id}"
        )));
    }

    if !timesheet.status.is_reviewable() {
        return Err(CoreError::InvalidState(format!(
            "Cannot review {} timesheet",
            timesheet.status.as_str().to_lowercase()
        )));
    }

    let (target, name) = if approve {
        (TimesheetStatus::Approved, actions::APPROVE_TIMESHEET)
    } else {
        (TimesheetStatus::Declined, actions::DECLINE_TIMESHEET)
    };

    let before: TimesheetStatus = timesheet.status;
    timesheet.set_status(target, now);

    let event: AuditEvent = AuditEvent::new(
        Actor::from(identity),
        Action::new(name, None),
        Cause::from_optional(reason),
        Some(before),
        target,
        now,
    );

    Ok(store.save(&timesheet, &event)?)
}

/// Forces a timesheet into any status.
///
/// Bypasses the rank gate and every status guard.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an admin (`Forbidden`)
/// - The timesheet does not exist (`NotFound`)
/// - Its status changed after it was read (`Conflict`)
/// - The store fails
pub fn admin_override<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    timesheet_id: i64,
    new_status: TimesheetStatus,
    now: OffsetDateTime,
) -> Result<Timesheet, CoreError> {
    if !identity.is_admin() {
        return Err(CoreError::Forbidden(String::from(
            "Only admins may override a timesheet status",
        )));
    }

    let Some(mut timesheet) = store.find_by_id(timesheet_id)? else {
        return Err(CoreError::NotFound(format!("Timesheet {timesheet_id}")));
    };

    let before: TimesheetStatus = timesheet.status;
    timesheet.set_status(new_status, now);

    let event: AuditEvent = AuditEvent::new(
        Actor::from(identity),
        Action::new(
            actions::OVERRIDE_STATUS,
            Some(format!("{before} -> {new_status}")),
        ),
        None,
        Some(before),
        new_status,
        now,
    );

    Ok(store.save(&timesheet, &event)?)
}
