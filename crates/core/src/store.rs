// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage contract the workflow engine runs against.

use timesheet_audit::AuditEvent;
use timesheet_domain::{Identity, Timesheet, TimesheetWeek};

/// Errors a [`TimesheetStore`] may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write raced another writer: the `(owner, year, week)` already
    /// exists, or the stored status changed since it was read.
    Conflict(String),
    /// Any other backend failure.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Backend(msg) => write!(f, "Backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Filters for the review listing. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    /// Case-sensitive substring of the owner's username.
    pub username: Option<String>,
    /// Exact year.
    pub year: Option<u16>,
    /// Exact week.
    pub week: Option<u8>,
}

impl ReviewFilter {
    /// Returns whether a timesheet and its owner's username pass the filter.
    #[must_use]
    pub fn matches(&self, timesheet: &Timesheet, owner_username: &str) -> bool {
        self.username
            .as_deref()
            .is_none_or(|needle| owner_username.contains(needle))
            && self.year.is_none_or(|y| timesheet.week.year() == y)
            && self.week.is_none_or(|w| timesheet.week.week() == w)
    }
}

/// A timesheet together with its owner's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// The timesheet.
    pub timesheet: Timesheet,
    /// The owner's username.
    pub owner_username: String,
}

/// Storage of timesheet aggregates and their audit trail.
///
/// Implementations must enforce at most one timesheet per
/// `(owner, year, week)` and persist header, rows and audit event as one
/// unit.
pub trait TimesheetStore {
    /// Finds the timesheet an owner has for a week.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_by_owner_and_week(
        &mut self,
        owner_id: i64,
        week: TimesheetWeek,
    ) -> Result<Option<Timesheet>, StoreError>;

    /// Finds a timesheet by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_by_id(&mut self, timesheet_id: i64) -> Result<Option<Timesheet>, StoreError>;

    /// Lists an owner's timesheets, newest week first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_by_owner(
        &mut self,
        owner_id: i64,
        year: Option<u16>,
        week: Option<u8>,
    ) -> Result<Vec<Timesheet>, StoreError>;

    /// Lists every timesheet passing `filter` whose owner `viewer` may see
    /// (see [`timesheet_domain::can_view`]), with owner usernames joined.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_all(
        &mut self,
        viewer: &Identity,
        filter: &ReviewFilter,
    ) -> Result<Vec<ReviewEntry>, StoreError>;

    /// Atomically writes the header, replaces the full row set and appends
    /// `event`.
    ///
    /// A timesheet without an id is inserted. A timesheet with an id is
    /// updated only while its stored status still equals `event.before`,
    /// the status the caller read.
    ///
    /// Returns the stored aggregate with ids assigned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the insert collides with an
    /// existing `(owner, year, week)` or the stored status no longer equals
    /// `event.before`. Nothing is written in that case. Returns
    /// [`StoreError::Backend`] on any other failure.
    fn save(&mut self, timesheet: &Timesheet, event: &AuditEvent)
    -> Result<Timesheet, StoreError>;

    /// Lists the audit events of a timesheet, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_status_history(&mut self, timesheet_id: i64) -> Result<Vec<AuditEvent>, StoreError>;
}
