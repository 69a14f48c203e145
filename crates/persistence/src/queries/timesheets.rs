// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timesheet::{ReviewEntry, ReviewFilter};
use timesheet_domain::{Identity, Timesheet, TimesheetWeek, can_view};
use tracing::debug;

use crate::conversions::{row_from_record, timesheet_from_rows};
use crate::data_models::{TimesheetHeaderRow, TimesheetRowRecord, UserRow};
use crate::diesel_schema::{timesheet_rows, timesheets, users};
use crate::error::PersistenceError;

type HeaderWithOwner = (TimesheetHeaderRow, UserRow);

fn load_rows(
    conn: &mut SqliteConnection,
    timesheet_id: i64,
) -> Result<Vec<TimesheetRowRecord>, PersistenceError> {
    timesheet_rows::table
        .filter(timesheet_rows::timesheet_id.eq(timesheet_id))
        .order(timesheet_rows::position.asc())
        .select(TimesheetRowRecord::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_rows: {e}")))
}

fn assemble(
    conn: &mut SqliteConnection,
    (header, owner): HeaderWithOwner,
) -> Result<Timesheet, PersistenceError> {
    let rows: Vec<TimesheetRowRecord> = load_rows(conn, header.timesheet_id)?;
    timesheet_from_rows(header, &owner, rows)
}

/// Loads a timesheet by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored data is malformed.
pub fn find_by_id(
    conn: &mut SqliteConnection,
    timesheet_id: i64,
) -> Result<Option<Timesheet>, PersistenceError> {
    let found: Option<HeaderWithOwner> = timesheets::table
        .inner_join(users::table)
        .filter(timesheets::timesheet_id.eq(timesheet_id))
        .select((TimesheetHeaderRow::as_select(), UserRow::as_select()))
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_by_id: {e}")))?;

    found.map(|pair| assemble(conn, pair)).transpose()
}

/// Loads the timesheet an owner has for a week.
///
/// # Errors
///
/// Returns an error if the query fails or the stored data is malformed.
pub fn find_by_owner_and_week(
    conn: &mut SqliteConnection,
    owner_id: i64,
    week: TimesheetWeek,
) -> Result<Option<Timesheet>, PersistenceError> {
    let found: Option<HeaderWithOwner> = timesheets::table
        .inner_join(users::table)
        .filter(timesheets::user_id.eq(owner_id))
        .filter(timesheets::year.eq(i32::from(week.year())))
        .filter(timesheets::week.eq(i32::from(week.week())))
        .select((TimesheetHeaderRow::as_select(), UserRow::as_select()))
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("find_by_owner_and_week: {e}")))?;

    found.map(|pair| assemble(conn, pair)).transpose()
}

/// Lists an owner's timesheets, year then week descending.
///
/// # Errors
///
/// Returns an error if the query fails or the stored data is malformed.
pub fn list_by_owner(
    conn: &mut SqliteConnection,
    owner_id: i64,
    year: Option<u16>,
    week: Option<u8>,
) -> Result<Vec<Timesheet>, PersistenceError> {
    let mut query = timesheets::table
        .inner_join(users::table)
        .select((TimesheetHeaderRow::as_select(), UserRow::as_select()))
        .filter(timesheets::user_id.eq(owner_id))
        .into_boxed();
    if let Some(year) = year {
        query = query.filter(timesheets::year.eq(i32::from(year)));
    }
    if let Some(week) = week {
        query = query.filter(timesheets::week.eq(i32::from(week)));
    }

    let headers: Vec<HeaderWithOwner> = query
        .order((timesheets::year.desc(), timesheets::week.desc()))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_by_owner: {e}")))?;

    headers
        .into_iter()
        .map(|pair| assemble(conn, pair))
        .collect()
}

/// Lists every timesheet passing `filter` that `viewer` may see, with the
/// owner's username, year then week descending.
///
/// Rows are loaded only for entries that pass both checks.
///
/// # Errors
///
/// Returns an error if the query fails or the stored data is malformed.
pub fn list_for_review(
    conn: &mut SqliteConnection,
    viewer: &Identity,
    filter: &ReviewFilter,
) -> Result<Vec<ReviewEntry>, PersistenceError> {
    let mut query = timesheets::table
        .inner_join(users::table)
        .select((TimesheetHeaderRow::as_select(), UserRow::as_select()))
        .into_boxed();
    if let Some(year) = filter.year {
        query = query.filter(timesheets::year.eq(i32::from(year)));
    }
    if let Some(week) = filter.week {
        query = query.filter(timesheets::week.eq(i32::from(week)));
    }

    let headers: Vec<HeaderWithOwner> = query
        .order((
            timesheets::year.desc(),
            timesheets::week.desc(),
            timesheets::timesheet_id.asc(),
        ))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_for_review: {e}")))?;
    let scanned: usize = headers.len();

    let mut entries: Vec<ReviewEntry> = Vec::new();
    for (header, owner) in headers {
        let timesheet_id: i64 = header.timesheet_id;
        let mut timesheet: Timesheet = timesheet_from_rows(header, &owner, Vec::new())?;
        if !filter.matches(&timesheet, &owner.username)
            || !can_view(viewer, timesheet.owner.role, timesheet.owner.rank)
        {
            continue;
        }

        timesheet.rows = load_rows(conn, timesheet_id)?
            .into_iter()
            .map(row_from_record)
            .collect::<Result<_, _>>()?;
        entries.push(ReviewEntry {
            timesheet,
            owner_username: owner.username,
        });
    }

    debug!(scanned, listed = entries.len(), "Listed timesheets for review");
    Ok(entries)
}
