// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use time::{OffsetDateTime, macros::datetime};
use timesheet_audit::AuditEvent;
use timesheet_domain::{
    Hours, Identity, Role, Timesheet, TimesheetRow, TimesheetStatus, TimesheetWeek, WeekdayHours,
    can_view,
};

use crate::{ReviewEntry, ReviewFilter, StoreError, TimesheetStore, UpsertTimesheet};

/// In-memory `TimesheetStore` with the same uniqueness behaviour as the
/// `SQLite` store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    timesheets: Vec<Timesheet>,
    usernames: HashMap<i64, String>,
    events: Vec<AuditEvent>,
    last_id: i64,
    /// When set, the next owner/week lookup misses, as if another request
    /// created the timesheet between our read and our write.
    pub hide_next_lookup: bool,
    /// When set, the next save first moves the targeted stored timesheet
    /// to this status, as if a reviewer acted between our read and our
    /// write.
    pub status_change_before_next_save: Option<TimesheetStatus>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, identity: &Identity, username: &str) {
        self.usernames
            .insert(identity.user_id(), username.to_string());
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn timesheet_count(&self) -> usize {
        self.timesheets.len()
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl TimesheetStore for MemoryStore {
    fn find_by_owner_and_week(
        &mut self,
        owner_id: i64,
        week: TimesheetWeek,
    ) -> Result<Option<Timesheet>, StoreError> {
        if self.hide_next_lookup {
            self.hide_next_lookup = false;
            return Ok(None);
        }
        Ok(self
            .timesheets
            .iter()
            .find(|t| t.owner.user_id == owner_id && t.week == week)
            .cloned())
    }

    fn find_by_id(&mut self, timesheet_id: i64) -> Result<Option<Timesheet>, StoreError> {
        Ok(self
            .timesheets
            .iter()
            .find(|t| t.timesheet_id == Some(timesheet_id))
            .cloned())
    }

    fn list_by_owner(
        &mut self,
        owner_id: i64,
        year: Option<u16>,
        week: Option<u8>,
    ) -> Result<Vec<Timesheet>, StoreError> {
        let mut result: Vec<Timesheet> = self
            .timesheets
            .iter()
            .filter(|t| t.owner.user_id == owner_id)
            .filter(|t| year.is_none_or(|y| t.week.year() == y))
            .filter(|t| week.is_none_or(|w| t.week.week() == w))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.week.cmp(&a.week));
        Ok(result)
    }

    fn list_all(
        &mut self,
        viewer: &Identity,
        filter: &ReviewFilter,
    ) -> Result<Vec<ReviewEntry>, StoreError> {
        Ok(self
            .timesheets
            .iter()
            .filter(|t| can_view(viewer, t.owner.role, t.owner.rank))
            .map(|t| ReviewEntry {
                timesheet: t.clone(),
                owner_username: self
                    .usernames
                    .get(&t.owner.user_id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .filter(|e| filter.matches(&e.timesheet, &e.owner_username))
            .collect())
    }

    fn save(
        &mut self,
        timesheet: &Timesheet,
        event: &AuditEvent,
    ) -> Result<Timesheet, StoreError> {
        let target: Option<usize> = self.timesheets.iter().position(|t| {
            timesheet.timesheet_id.map_or_else(
                || t.owner.user_id == timesheet.owner.user_id && t.week == timesheet.week,
                |id| t.timesheet_id == Some(id),
            )
        });
        if let (Some(status), Some(i)) = (self.status_change_before_next_save.take(), target) {
            self.timesheets[i].status = status;
        }

        let mut stored: Timesheet = timesheet.clone();
        match (stored.timesheet_id, target) {
            (Some(id), None) => {
                return Err(StoreError::Backend(format!("Timesheet {id} missing")));
            }
            (Some(id), Some(i)) => {
                if event.before != Some(self.timesheets[i].status) {
                    return Err(StoreError::Conflict(format!(
                        "Timesheet {id} changed concurrently"
                    )));
                }
            }
            (None, Some(_)) => {
                return Err(StoreError::Conflict(format!(
                    "Timesheet for {} already exists",
                    stored.week
                )));
            }
            (None, None) => stored.timesheet_id = Some(self.next_id()),
        }

        for row in &mut stored.rows {
            row.row_id = Some(self.next_id());
        }

        match target {
            Some(i) => self.timesheets[i] = stored.clone(),
            None => self.timesheets.push(stored.clone()),
        }

        let timesheet_id: i64 = stored.timesheet_id.unwrap();
        let mut recorded: AuditEvent = event.for_timesheet(timesheet_id);
        recorded.event_id = Some(self.next_id());
        self.events.push(recorded);

        Ok(stored)
    }

    fn list_status_history(&mut self, timesheet_id: i64) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.timesheet_id == Some(timesheet_id))
            .cloned()
            .collect())
    }
}

pub fn admin() -> Identity {
    Identity::new(1, Role::Admin, None)
}

pub fn super1() -> Identity {
    Identity::new(2, Role::Supervisor, Some(1))
}

pub fn super2() -> Identity {
    Identity::new(3, Role::Supervisor, Some(2))
}

pub fn worker() -> Identity {
    Identity::new(4, Role::Worker, None)
}

pub fn other_worker() -> Identity {
    Identity::new(5, Role::Worker, None)
}

pub fn seeded_store() -> MemoryStore {
    let mut store: MemoryStore = MemoryStore::new();
    store.register(&admin(), "admin");
    store.register(&super1(), "super1");
    store.register(&super2(), "super2");
    store.register(&worker(), "worker");
    store.register(&other_worker(), "casual");
    store
}

pub fn now() -> OffsetDateTime {
    datetime!(2025-08-04 09:00 UTC)
}

pub fn later() -> OffsetDateTime {
    datetime!(2025-08-08 17:30 UTC)
}

pub fn week(year: u16, week: u8) -> TimesheetWeek {
    TimesheetWeek::new(year, week).unwrap()
}

/// A row with `monday` hundredths booked on Monday and nothing else.
pub fn row(task: &str, monday: u32) -> TimesheetRow {
    let mut days: [Hours; 7] = [Hours::ZERO; 7];
    days[0] = Hours::from_hundredths(monday);
    TimesheetRow::new(task, None, WeekdayHours::from_days(days).unwrap()).unwrap()
}

pub fn snapshot(
    w: TimesheetWeek,
    rows: Vec<TimesheetRow>,
    requested_status: Option<TimesheetStatus>,
) -> UpsertTimesheet {
    UpsertTimesheet {
        week: w,
        rows,
        requested_status,
    }
}
