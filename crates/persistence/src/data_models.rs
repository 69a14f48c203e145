// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use timesheet_domain::{Identity, Role};

use crate::diesel_schema::{timesheet_audit_events, timesheet_rows, timesheets, users};

/// A registered user, as resolved by the server's identity extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    pub supervisor_rank: Option<u16>,
}

impl UserData {
    /// Builds the identity this user acts under.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.role, self.supervisor_rank)
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub role: String,
    pub supervisor_rank: Option<i32>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = timesheets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimesheetHeaderRow {
    pub timesheet_id: i64,
    pub user_id: i64,
    pub year: i32,
    pub week: i32,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = timesheet_rows)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TimesheetRowRecord {
    pub row_id: i64,
    pub timesheet_id: i64,
    pub position: i32,
    pub project_or_task: String,
    pub notes: Option<String>,
    pub monday: i32,
    pub tuesday: i32,
    pub wednesday: i32,
    pub thursday: i32,
    pub friday: i32,
    pub saturday: i32,
    pub sunday: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = timesheet_rows)]
pub struct NewTimesheetRow<'a> {
    pub timesheet_id: i64,
    pub position: i32,
    pub project_or_task: &'a str,
    pub notes: Option<&'a str>,
    pub monday: i32,
    pub tuesday: i32,
    pub wednesday: i32,
    pub thursday: i32,
    pub friday: i32,
    pub saturday: i32,
    pub sunday: i32,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = timesheet_audit_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditEventRow {
    pub event_id: i64,
    pub timesheet_id: i64,
    pub actor_user_id: i64,
    pub actor_role: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub reason: Option<String>,
    pub before_status: Option<String>,
    pub after_status: String,
    pub recorded_at: String,
}
