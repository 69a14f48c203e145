// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions wrapping the timesheet operations.
//!
//! Each handler translates its request DTO into domain types, runs the
//! operation against the supplied store with the current time, and
//! translates the result back into response DTOs.

use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use timesheet::{
    ReviewEntry, ReviewFilter, TimesheetStore, UpsertTimesheet, WorkflowConfig,
};
use timesheet_audit::AuditEvent;
use timesheet_domain::{
    DomainError, Hours, Identity, Owner, Role, Timesheet, TimesheetRow, TimesheetStatus,
    TimesheetWeek, WEEKDAYS, WeekdayHours,
};
use tracing::{debug, info};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AdminOverrideRequest, ListMineRequest, ListMineResponse, ReviewActionRequest,
    ReviewEntryInfo, ReviewRequest, ReviewResponse, StatusHistoryInfo, StatusHistoryResponse,
    SubmitTimesheetRequest, TimesheetInfo, TimesheetRowInfo, UpsertRowRequest,
    UpsertTimesheetRequest,
};

fn format_timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn parse_week(year: u16, week: u8) -> Result<TimesheetWeek, ApiError> {
    TimesheetWeek::new(year, week).map_err(translate_domain_error)
}

fn parse_status(value: &str) -> Result<TimesheetStatus, ApiError> {
    TimesheetStatus::from_str(value).map_err(translate_domain_error)
}

/// Builds a domain row, attributing hour errors to their weekday.
fn build_row(request: &UpsertRowRequest) -> Result<TimesheetRow, ApiError> {
    let mut days: [Hours; 7] = [Hours::ZERO; 7];
    for ((slot, weekday), value) in days.iter_mut().zip(WEEKDAYS).zip(request.days()) {
        *slot = Hours::from_f64(value).map_err(|err| match err {
            DomainError::InvalidHours { reason, .. } => {
                translate_domain_error(DomainError::InvalidHours {
                    weekday: Some(weekday),
                    reason,
                })
            }
            other => translate_domain_error(other),
        })?;
    }
    let hours: WeekdayHours = WeekdayHours::from_days(days).map_err(translate_domain_error)?;
    TimesheetRow::new(&request.project_or_task, request.notes.as_deref(), hours)
        .map_err(translate_domain_error)
}

fn to_row_info(row: &TimesheetRow) -> TimesheetRowInfo {
    let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] =
        row.hours.days().map(Hours::as_f64);
    TimesheetRowInfo {
        row_id: row.row_id,
        project_or_task: row.project_or_task.clone(),
        notes: row.notes.clone(),
        monday,
        tuesday,
        wednesday,
        thursday,
        friday,
        saturday,
        sunday,
        total: row.total().as_f64(),
    }
}

/// Converts a stored timesheet into its response DTO.
///
/// # Errors
///
/// Returns an error if the timesheet has no id or a timestamp cannot be
/// formatted.
pub fn to_timesheet_info(timesheet: &Timesheet) -> Result<TimesheetInfo, ApiError> {
    let timesheet_id: i64 = timesheet.timesheet_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Stored timesheet has no id"),
    })?;
    Ok(TimesheetInfo {
        timesheet_id,
        owner_user_id: timesheet.owner.user_id,
        year: timesheet.week.year(),
        week: timesheet.week.week(),
        status: timesheet.status.to_string(),
        rows: timesheet.rows.iter().map(to_row_info).collect(),
        total_hours: timesheet.total_hours().as_f64(),
        created_at: format_timestamp(timesheet.created_at)?,
        updated_at: format_timestamp(timesheet.updated_at)?,
    })
}

fn to_history_info(event: &AuditEvent) -> Result<StatusHistoryInfo, ApiError> {
    Ok(StatusHistoryInfo {
        event_id: event.event_id,
        actor_user_id: event.actor.user_id,
        actor_role: event.actor.role.to_string(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        reason: event.cause.as_ref().map(|c| c.reason.clone()),
        before_status: event.before.as_ref().map(ToString::to_string),
        after_status: event.after.to_string(),
        recorded_at: format_timestamp(event.recorded_at)?,
    })
}

/// Lists the caller's own timesheets, newest week first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_mine<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    request: &ListMineRequest,
) -> Result<ListMineResponse, ApiError> {
    let timesheets: Vec<Timesheet> =
        timesheet::list_mine(store, identity, request.year, request.week)
            .map_err(translate_core_error)?;
    debug!(
        user_id = identity.user_id(),
        count = timesheets.len(),
        "Listed own timesheets"
    );
    Ok(ListMineResponse {
        timesheets: timesheets
            .iter()
            .map(to_timesheet_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Creates or replaces the caller's timesheet for a week.
///
/// Client row ids are ignored; the submitted rows become the full row set.
///
/// # Errors
///
/// Returns an error if:
/// - The week, a row, or the requested status is invalid
/// - The caller requests a status owners may not set
/// - The edit policy locks the timesheet
/// - The store fails
pub fn upsert_mine<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    config: &WorkflowConfig,
    request: &UpsertTimesheetRequest,
) -> Result<TimesheetInfo, ApiError> {
    let week: TimesheetWeek = parse_week(request.year, request.week)?;
    let requested_status: Option<TimesheetStatus> =
        request.status.as_deref().map(parse_status).transpose()?;
    let rows: Vec<TimesheetRow> = request
        .rows
        .iter()
        .map(build_row)
        .collect::<Result<_, _>>()?;

    let saved: Timesheet = timesheet::upsert_mine(
        store,
        identity,
        config,
        UpsertTimesheet {
            week,
            rows,
            requested_status,
        },
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    info!(
        user_id = identity.user_id(),
        timesheet_id = ?saved.timesheet_id,
        %week,
        status = %saved.status,
        rows = saved.rows.len(),
        "Saved timesheet"
    );
    to_timesheet_info(&saved)
}

/// Submits the caller's timesheet for a week.
///
/// # Errors
///
/// Returns an error if the week is invalid, no timesheet exists for it,
/// it is Approved, or the store fails.
pub fn submit_mine<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    request: &SubmitTimesheetRequest,
) -> Result<TimesheetInfo, ApiError> {
    let week: TimesheetWeek = parse_week(request.year, request.week)?;
    let submitted: Timesheet =
        timesheet::submit_mine(store, identity, week, OffsetDateTime::now_utc())
            .map_err(translate_core_error)?;
    info!(
        user_id = identity.user_id(),
        timesheet_id = ?submitted.timesheet_id,
        %week,
        "Submitted timesheet"
    );
    to_timesheet_info(&submitted)
}

/// Lists the timesheets the caller may review.
///
/// # Errors
///
/// Returns an error if the caller is a worker or the store fails.
pub fn review<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    request: &ReviewRequest,
) -> Result<ReviewResponse, ApiError> {
    let filter: ReviewFilter = ReviewFilter {
        username: request.username.clone().filter(|u| !u.is_empty()),
        year: request.year,
        week: request.week,
    };
    let entries: Vec<ReviewEntry> =
        timesheet::review(store, identity, &filter).map_err(translate_core_error)?;
    debug!(
        user_id = identity.user_id(),
        role = %identity.role(),
        count = entries.len(),
        "Listed timesheets for review"
    );
    Ok(ReviewResponse {
        entries: entries
            .iter()
            .map(|entry| {
                let owner: &Owner = &entry.timesheet.owner;
                Ok(ReviewEntryInfo {
                    owner_username: entry.owner_username.clone(),
                    owner_role: owner.role.to_string(),
                    owner_rank: (owner.role == Role::Supervisor).then_some(owner.rank.value()),
                    timesheet: to_timesheet_info(&entry.timesheet)?,
                })
            })
            .collect::<Result<_, ApiError>>()?,
    })
}

/// Approves or declines a timesheet.
///
/// # Errors
///
/// Returns an error if the caller is a worker, the timesheet does not
/// exist, the caller's rank does not cover the owner, the timesheet is
/// not reviewable, or the store fails.
pub fn review_action<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    request: &ReviewActionRequest,
) -> Result<TimesheetInfo, ApiError> {
    let reviewed: Timesheet = timesheet::review_action(
        store,
        identity,
        request.timesheet_id,
        request.approve,
        request.reason.as_deref(),
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;
    info!(
        user_id = identity.user_id(),
        timesheet_id = request.timesheet_id,
        status = %reviewed.status,
        "Reviewed timesheet"
    );
    to_timesheet_info(&reviewed)
}

/// Forces a timesheet into any status. Admin only.
///
/// # Errors
///
/// Returns an error if the status is invalid, the caller is not an admin,
/// the timesheet does not exist, or the store fails.
pub fn admin_override<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    request: &AdminOverrideRequest,
) -> Result<TimesheetInfo, ApiError> {
    let new_status: TimesheetStatus = parse_status(&request.status)?;
    let overridden: Timesheet = timesheet::admin_override(
        store,
        identity,
        request.timesheet_id,
        new_status,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;
    info!(
        user_id = identity.user_id(),
        timesheet_id = request.timesheet_id,
        status = %new_status,
        "Overrode timesheet status"
    );
    to_timesheet_info(&overridden)
}

/// Returns a timesheet's status history, oldest first.
///
/// # Errors
///
/// Returns an error if the timesheet does not exist, the caller may not
/// view it, or the store fails.
pub fn status_history<S: TimesheetStore>(
    store: &mut S,
    identity: &Identity,
    timesheet_id: i64,
) -> Result<StatusHistoryResponse, ApiError> {
    let events: Vec<AuditEvent> =
        timesheet::status_history(store, identity, timesheet_id).map_err(translate_core_error)?;
    Ok(StatusHistoryResponse {
        timesheet_id,
        events: events
            .iter()
            .map(to_history_info)
            .collect::<Result<_, _>>()?,
    })
}
