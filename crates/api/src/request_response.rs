// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};

/// One row of an upsert request.
///
/// Hours are decimal values per weekday. Missing days default to zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpsertRowRequest {
    /// Client-side row id. Accepted and ignored; rows are always replaced.
    #[serde(default)]
    pub row_id: Option<i64>,
    /// The project or task the hours were spent on.
    pub project_or_task: String,
    /// Optional notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Monday hours.
    #[serde(default)]
    pub monday: f64,
    /// Tuesday hours.
    #[serde(default)]
    pub tuesday: f64,
    /// Wednesday hours.
    #[serde(default)]
    pub wednesday: f64,
    /// Thursday hours.
    #[serde(default)]
    pub thursday: f64,
    /// Friday hours.
    #[serde(default)]
    pub friday: f64,
    /// Saturday hours.
    #[serde(default)]
    pub saturday: f64,
    /// Sunday hours.
    #[serde(default)]
    pub sunday: f64,
}

impl UpsertRowRequest {
    /// Returns the hours Monday first.
    #[must_use]
    pub const fn days(&self) -> [f64; 7] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
            self.sunday,
        ]
    }
}

/// API request to create or replace the caller's timesheet for a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertTimesheetRequest {
    /// The year.
    pub year: u16,
    /// The week number (1-53).
    pub week: u8,
    /// The complete row set.
    #[serde(default)]
    pub rows: Vec<UpsertRowRequest>,
    /// Optional status to set (`Draft` or `Submitted`).
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to submit the caller's timesheet for a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTimesheetRequest {
    /// The year.
    pub year: u16,
    /// The week number.
    pub week: u8,
}

/// API request to list the caller's own timesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListMineRequest {
    /// Restrict to a year.
    #[serde(default)]
    pub year: Option<u16>,
    /// Restrict to a week number.
    #[serde(default)]
    pub week: Option<u8>,
}

/// API request for the review listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Case-sensitive substring of the owner's username.
    #[serde(default)]
    pub username: Option<String>,
    /// Restrict to a year.
    #[serde(default)]
    pub year: Option<u16>,
    /// Restrict to a week number.
    #[serde(default)]
    pub week: Option<u8>,
}

/// API request to approve or decline a timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewActionRequest {
    /// The timesheet to act on.
    pub timesheet_id: i64,
    /// `true` to approve, `false` to decline.
    pub approve: bool,
    /// Optional reason, recorded in the status history.
    #[serde(default)]
    pub reason: Option<String>,
}

/// API request to force a timesheet into a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOverrideRequest {
    /// The timesheet to change.
    pub timesheet_id: i64,
    /// The target status.
    pub status: String,
}

/// A stored timesheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetRowInfo {
    /// The row id assigned on the last save.
    pub row_id: Option<i64>,
    /// The project or task.
    pub project_or_task: String,
    /// Optional notes.
    pub notes: Option<String>,
    /// Monday hours.
    pub monday: f64,
    /// Tuesday hours.
    pub tuesday: f64,
    /// Wednesday hours.
    pub wednesday: f64,
    /// Thursday hours.
    pub thursday: f64,
    /// Friday hours.
    pub friday: f64,
    /// Saturday hours.
    pub saturday: f64,
    /// Sunday hours.
    pub sunday: f64,
    /// Sum over the week.
    pub total: f64,
}

/// A stored timesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetInfo {
    /// The timesheet id.
    pub timesheet_id: i64,
    /// The owning user.
    pub owner_user_id: i64,
    /// The year.
    pub year: u16,
    /// The week number.
    pub week: u8,
    /// The current status.
    pub status: String,
    /// Rows in display order.
    pub rows: Vec<TimesheetRowInfo>,
    /// Sum of all rows.
    pub total_hours: f64,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Last change time (RFC 3339).
    pub updated_at: String,
}

/// API response listing the caller's own timesheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMineResponse {
    /// Timesheets, newest week first.
    pub timesheets: Vec<TimesheetInfo>,
}

/// A review listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntryInfo {
    /// The owner's username.
    pub owner_username: String,
    /// The owner's role.
    pub owner_role: String,
    /// The owner's supervisor rank. Absent for admins and workers.
    pub owner_rank: Option<u16>,
    /// The timesheet.
    pub timesheet: TimesheetInfo,
}

/// API response for the review listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Visible timesheets, newest week first.
    pub entries: Vec<ReviewEntryInfo>,
}

/// One entry of a timesheet's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryInfo {
    /// The event id.
    pub event_id: Option<i64>,
    /// Who acted.
    pub actor_user_id: i64,
    /// The actor's role at the time.
    pub actor_role: String,
    /// The action name.
    pub action: String,
    /// Optional action details.
    pub details: Option<String>,
    /// Optional reason supplied by the actor.
    pub reason: Option<String>,
    /// Status before the change. Absent on creation.
    pub before_status: Option<String>,
    /// Status after the change.
    pub after_status: String,
    /// When the change happened (RFC 3339).
    pub recorded_at: String,
}

/// API response for a timesheet's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryResponse {
    /// The timesheet id.
    pub timesheet_id: i64,
    /// Events, oldest first.
    pub events: Vec<StatusHistoryInfo>,
}
