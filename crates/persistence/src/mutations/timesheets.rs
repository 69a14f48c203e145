// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use timesheet_audit::{Action, Actor, AuditEvent, actions};
use timesheet_domain::{
    DomainError, Hours, Identity, Timesheet, TimesheetRow, TimesheetStatus, TimesheetWeek,
    WeekdayHours,
};
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::conversions::{format_timestamp, new_row_record};
use crate::data_models::NewTimesheetRow;
use crate::diesel_schema::{timesheet_rows, timesheets};
use crate::error::PersistenceError;
use crate::mutations::audit::insert_audit_event;
use crate::queries::timesheets::find_by_owner_and_week;

fn insert_header(
    conn: &mut SqliteConnection,
    timesheet: &Timesheet,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(timesheets::table)
        .values((
            timesheets::user_id.eq(timesheet.owner.user_id),
            timesheets::year.eq(i32::from(timesheet.week.year())),
            timesheets::week.eq(i32::from(timesheet.week.week())),
            timesheets::status.eq(timesheet.status.as_str()),
            timesheets::created_at.eq(format_timestamp(timesheet.created_at)?),
            timesheets::updated_at.eq(format_timestamp(timesheet.updated_at)?),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

/// Writes status and `updated_at` while the stored status still equals
/// `expected`. Owner, week and `created_at` never change.
fn update_header(
    conn: &mut SqliteConnection,
    timesheet_id: i64,
    timesheet: &Timesheet,
    expected: Option<TimesheetStatus>,
) -> Result<(), PersistenceError> {
    let Some(expected) = expected else {
        return Err(PersistenceError::TimesheetConflict(format!(
            "Timesheet {timesheet_id} already exists"
        )));
    };

    let updated: usize = diesel::update(
        timesheets::table
            .filter(timesheets::timesheet_id.eq(timesheet_id))
            .filter(timesheets::status.eq(expected.as_str())),
    )
    .set((
        timesheets::status.eq(timesheet.status.as_str()),
        timesheets::updated_at.eq(format_timestamp(timesheet.updated_at)?),
    ))
    .execute(conn)?;

    if updated > 0 {
        return Ok(());
    }

    let stored: Option<String> = timesheets::table
        .find(timesheet_id)
        .select(timesheets::status)
        .first::<String>(conn)
        .optional()?;
    match stored {
        Some(status) => {
            warn!(
                timesheet_id,
                expected = %expected,
                stored = %status,
                "Timesheet status changed since it was read"
            );
            Err(PersistenceError::TimesheetConflict(format!(
                "Timesheet {timesheet_id} changed concurrently"
            )))
        }
        None => Err(PersistenceError::NotFound(format!(
            "Timesheet {timesheet_id}"
        ))),
    }
}

/// Deletes every row of the timesheet and inserts `timesheet.rows` in order.
fn replace_rows(
    conn: &mut SqliteConnection,
    timesheet_id: i64,
    timesheet: &Timesheet,
) -> Result<(), PersistenceError> {
    let removed: usize = diesel::delete(
        timesheet_rows::table.filter(timesheet_rows::timesheet_id.eq(timesheet_id)),
    )
    .execute(conn)?;

    let records: Vec<NewTimesheetRow<'_>> = timesheet
        .rows
        .iter()
        .enumerate()
        .map(|(position, row)| new_row_record(timesheet_id, position, row))
        .collect::<Result<_, _>>()?;

    if !records.is_empty() {
        diesel::insert_into(timesheet_rows::table)
            .values(&records)
            .execute(conn)?;
    }

    debug!(
        timesheet_id,
        removed,
        inserted = records.len(),
        "Replaced timesheet rows"
    );
    Ok(())
}

/// Inserts a new header. Losing a create race to another writer is a
/// conflict.
fn insert_new_header(
    conn: &mut SqliteConnection,
    timesheet: &Timesheet,
) -> Result<i64, PersistenceError> {
    insert_header(conn, timesheet).map_err(|e| match e {
        PersistenceError::UniqueViolation(_) => {
            info!(
                owner = timesheet.owner.user_id,
                week = %timesheet.week,
                "Create collided with an existing timesheet"
            );
            PersistenceError::TimesheetConflict(format!(
                "Timesheet for {} already exists",
                timesheet.week
            ))
        }
        other => other,
    })
}

/// Saves header, full row set and audit event in one transaction.
///
/// # Returns
///
/// The id of the stored timesheet.
///
/// # Errors
///
/// Returns [`PersistenceError::TimesheetConflict`] if a create collided
/// with an existing timesheet or the stored status no longer equals
/// `event.before`, or another error if any statement fails. Nothing is
/// written on error.
pub fn save_timesheet(
    conn: &mut SqliteConnection,
    timesheet: &Timesheet,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let timesheet_id: i64 = match timesheet.timesheet_id {
            Some(timesheet_id) => {
                update_header(conn, timesheet_id, timesheet, event.before)?;
                timesheet_id
            }
            None => insert_new_header(conn, timesheet)?,
        };

        replace_rows(conn, timesheet_id, timesheet)?;
        let event_id: i64 = insert_audit_event(conn, timesheet_id, event)?;

        info!(
            timesheet_id,
            event_id,
            status = %timesheet.status,
            "Saved timesheet"
        );
        Ok(timesheet_id)
    })
}

fn demo_error(e: DomainError) -> PersistenceError {
    PersistenceError::InitializationError(format!("demo timesheet: {e}"))
}

/// Gives `worker` a Draft "Onboarding" timesheet, 2 hours Monday through
/// Friday, for the ISO week containing `now`.
///
/// # Returns
///
/// The new timesheet id, or `None` if the worker already has a timesheet
/// for that week.
///
/// # Errors
///
/// Returns an error if the week cannot be represented or the save fails.
pub fn seed_onboarding_timesheet(
    conn: &mut SqliteConnection,
    worker: &Identity,
    now: OffsetDateTime,
) -> Result<Option<i64>, PersistenceError> {
    let (year, week, _) = now.to_iso_week_date();
    let year: u16 = u16::try_from(year).map_err(|e| {
        PersistenceError::InitializationError(format!("demo timesheet year: {e}"))
    })?;
    let week: TimesheetWeek = TimesheetWeek::new(year, week).map_err(demo_error)?;

    if find_by_owner_and_week(conn, worker.user_id(), week)?.is_some() {
        debug!(owner = worker.user_id(), %week, "Demo timesheet already present");
        return Ok(None);
    }

    let two: Hours = Hours::from_hundredths(200);
    let zero: Hours = Hours::from_hundredths(0);
    let hours: WeekdayHours =
        WeekdayHours::from_days([two, two, two, two, two, zero, zero]).map_err(demo_error)?;
    let row: TimesheetRow =
        TimesheetRow::new("Onboarding", Some("Initial setup"), hours).map_err(demo_error)?;

    let mut timesheet: Timesheet = Timesheet::new_draft(worker.as_owner(), week, now);
    timesheet.replace_rows(vec![row]);
    let event: AuditEvent = AuditEvent::new(
        Actor::from(worker),
        Action::new(actions::CREATE_TIMESHEET, Some(String::from("demo seed"))),
        None,
        None,
        TimesheetStatus::Draft,
        now,
    );

    save_timesheet(conn, &timesheet, &event).map(Some)
}
