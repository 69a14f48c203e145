// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversions between stored columns and domain values.
//!
//! Timestamps are RFC 3339 text. Hours are integer hundredths.

use std::str::FromStr;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use timesheet_audit::{Action, Actor, AuditEvent, Cause};
use timesheet_domain::{
    Hours, Owner, Role, Timesheet, TimesheetRow, TimesheetStatus, TimesheetWeek, WeekdayHours,
};

use crate::data_models::{
    AuditEventRow, NewTimesheetRow, TimesheetHeaderRow, TimesheetRowRecord, UserData, UserRow,
};
use crate::error::PersistenceError;

fn reconstruction<E: std::fmt::Display>(what: &str) -> impl Fn(E) -> PersistenceError + '_ {
    move |e| PersistenceError::ReconstructionError(format!("{what}: {e}"))
}

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::QueryFailed(format!("format timestamp: {e}")))
}

pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(reconstruction("timestamp"))
}

pub fn parse_status(value: &str) -> Result<TimesheetStatus, PersistenceError> {
    TimesheetStatus::from_str(value).map_err(reconstruction("status"))
}

pub fn parse_role(value: &str) -> Result<Role, PersistenceError> {
    Role::from_str(value).map_err(reconstruction("role"))
}

pub fn rank_to_column(rank: Option<u16>) -> Option<i32> {
    rank.map(i32::from)
}

pub fn rank_from_column(rank: Option<i32>) -> Result<Option<u16>, PersistenceError> {
    rank.map(u16::try_from)
        .transpose()
        .map_err(reconstruction("supervisor rank"))
}

fn hours_to_column(hours: Hours) -> Result<i32, PersistenceError> {
    i32::try_from(hours.hundredths())
        .map_err(|e| PersistenceError::QueryFailed(format!("hours out of range: {e}")))
}

fn hours_from_column(value: i32) -> Result<Hours, PersistenceError> {
    u32::try_from(value)
        .map(Hours::from_hundredths)
        .map_err(reconstruction("hours"))
}

pub fn user_from_row(row: UserRow) -> Result<UserData, PersistenceError> {
    Ok(UserData {
        user_id: row.user_id,
        role: parse_role(&row.role)?,
        supervisor_rank: rank_from_column(row.supervisor_rank)?,
        username: row.username,
    })
}

pub fn new_row_record(
    timesheet_id: i64,
    position: usize,
    row: &TimesheetRow,
) -> Result<NewTimesheetRow<'_>, PersistenceError> {
    let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = row.hours.days();
    Ok(NewTimesheetRow {
        timesheet_id,
        position: i32::try_from(position)
            .map_err(|e| PersistenceError::QueryFailed(format!("row position: {e}")))?,
        project_or_task: &row.project_or_task,
        notes: row.notes.as_deref(),
        monday: hours_to_column(monday)?,
        tuesday: hours_to_column(tuesday)?,
        wednesday: hours_to_column(wednesday)?,
        thursday: hours_to_column(thursday)?,
        friday: hours_to_column(friday)?,
        saturday: hours_to_column(saturday)?,
        sunday: hours_to_column(sunday)?,
    })
}

pub fn row_from_record(record: TimesheetRowRecord) -> Result<TimesheetRow, PersistenceError> {
    let days: [Hours; 7] = [
        hours_from_column(record.monday)?,
        hours_from_column(record.tuesday)?,
        hours_from_column(record.wednesday)?,
        hours_from_column(record.thursday)?,
        hours_from_column(record.friday)?,
        hours_from_column(record.saturday)?,
        hours_from_column(record.sunday)?,
    ];
    let hours: WeekdayHours = WeekdayHours::from_days(days).map_err(reconstruction("row hours"))?;
    Ok(TimesheetRow::with_id(
        record.row_id,
        record.project_or_task,
        record.notes,
        hours,
    ))
}

/// Assembles an aggregate from its header, owner and ordered rows.
pub fn timesheet_from_rows(
    header: TimesheetHeaderRow,
    owner: &UserRow,
    rows: Vec<TimesheetRowRecord>,
) -> Result<Timesheet, PersistenceError> {
    let year: u16 = u16::try_from(header.year).map_err(reconstruction("year"))?;
    let week: u8 = u8::try_from(header.week).map_err(reconstruction("week"))?;

    Ok(Timesheet {
        timesheet_id: Some(header.timesheet_id),
        owner: Owner::new(
            header.user_id,
            parse_role(&owner.role)?,
            rank_from_column(owner.supervisor_rank)?,
        ),
        week: TimesheetWeek::new(year, week).map_err(reconstruction("week"))?,
        status: parse_status(&header.status)?,
        rows: rows
            .into_iter()
            .map(row_from_record)
            .collect::<Result<Vec<_>, _>>()?,
        created_at: parse_timestamp(&header.created_at)?,
        updated_at: parse_timestamp(&header.updated_at)?,
    })
}

pub fn audit_event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    Ok(AuditEvent {
        event_id: Some(row.event_id),
        timesheet_id: Some(row.timesheet_id),
        actor: Actor::new(row.actor_user_id, parse_role(&row.actor_role)?),
        action: Action {
            name: row.action_name,
            details: row.action_details,
        },
        cause: row.reason.map(Cause::new),
        before: row.before_status.as_deref().map(parse_status).transpose()?,
        after: parse_status(&row.after_status)?,
        recorded_at: parse_timestamp(&row.recorded_at)?,
    })
}
