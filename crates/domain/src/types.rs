// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::identity::Owner;
use crate::status::TimesheetStatus;
use crate::validation::{validate_project_or_task, validate_week, validate_year};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Weekday};

/// Weekdays in row order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// The `(year, week)` a timesheet covers.
///
/// Both values are supplied by the caller; only their ranges are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimesheetWeek {
    year: u16,
    week: u8,
}

impl TimesheetWeek {
    /// Creates a validated `TimesheetWeek`.
    ///
    /// # Errors
    ///
    /// Returns an error if the year or week is out of range.
    pub fn new(year: u16, week: u8) -> Result<Self, DomainError> {
        validate_year(year)?;
        validate_week(week)?;
        Ok(Self { year, week })
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the week number.
    #[must_use]
    pub const fn week(&self) -> u8 {
        self.week
    }
}

impl std::fmt::Display for TimesheetWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// A non-negative number of hours with two decimal places.
///
/// Stored as hundredths of an hour so arithmetic and equality are exact.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Hours {
    hundredths: u32,
}

impl Hours {
    /// Zero hours.
    pub const ZERO: Self = Self { hundredths: 0 };

    /// Upper bound for a single weekday.
    pub const MAX_PER_DAY: Self = Self { hundredths: 2400 };

    /// Creates hours from hundredths of an hour.
    #[must_use]
    pub const fn from_hundredths(hundredths: u32) -> Self {
        Self { hundredths }
    }

    /// Converts a decimal value, rounding to the nearest hundredth.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative, not finite, or too large
    /// to represent.
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidHours {
                weekday: None,
                reason: format!("Hours must be a non-negative number, got {value}"),
            });
        }
        let hundredths: u32 =
            (value * 100.0)
                .round()
                .to_u32()
                .ok_or_else(|| DomainError::InvalidHours {
                    weekday: None,
                    reason: format!("Hours value {value} is too large"),
                })?;
        Ok(Self { hundredths })
    }

    /// Returns the value in hundredths of an hour.
    #[must_use]
    pub const fn hundredths(self) -> u32 {
        self.hundredths
    }

    /// Returns the value as a decimal number.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.hundredths) / 100.0
    }

    /// Adds two values, saturating at the maximum representable value.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            hundredths: self.hundredths.saturating_add(other.hundredths),
        }
    }
}

impl std::iter::Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl std::fmt::Display for Hours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.hundredths / 100, self.hundredths % 100)
    }
}

/// Hours booked on each weekday, Monday through Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekdayHours {
    days: [Hours; 7],
}

impl WeekdayHours {
    /// Creates weekday hours from Monday-first values.
    ///
    /// # Errors
    ///
    /// Returns an error if any day exceeds [`Hours::MAX_PER_DAY`].
    pub fn from_days(days: [Hours; 7]) -> Result<Self, DomainError> {
        for (weekday, hours) in WEEKDAYS.iter().zip(days.iter()) {
            if *hours > Hours::MAX_PER_DAY {
                return Err(DomainError::InvalidHours {
                    weekday: Some(*weekday),
                    reason: format!("{hours} exceeds {} hours", Hours::MAX_PER_DAY),
                });
            }
        }
        Ok(Self { days })
    }

    /// Returns the hours booked on `weekday`.
    #[must_use]
    pub fn get(&self, weekday: Weekday) -> Hours {
        self.days[weekday.number_days_from_monday() as usize]
    }

    /// Iterates over `(weekday, hours)` pairs, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Hours)> + '_ {
        WEEKDAYS.iter().copied().zip(self.days.iter().copied())
    }

    /// Returns the Monday-first values.
    #[must_use]
    pub const fn days(&self) -> [Hours; 7] {
        self.days
    }

    /// Returns the sum over all weekdays.
    #[must_use]
    pub fn total(&self) -> Hours {
        self.days.iter().copied().sum()
    }
}

/// One project or task line of a timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetRow {
    /// Storage identifier. `None` until persisted; regenerated on every save.
    pub row_id: Option<i64>,
    /// The project or task the hours were spent on.
    pub project_or_task: String,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Hours per weekday.
    pub hours: WeekdayHours,
}

impl TimesheetRow {
    /// Creates a new, unpersisted row.
    ///
    /// Blank notes are stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_or_task` is empty.
    pub fn new(
        project_or_task: &str,
        notes: Option<&str>,
        hours: WeekdayHours,
    ) -> Result<Self, DomainError> {
        validate_project_or_task(project_or_task)?;
        Ok(Self {
            row_id: None,
            project_or_task: project_or_task.trim().to_string(),
            notes: notes
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(ToString::to_string),
            hours,
        })
    }

    /// Creates a row loaded from storage.
    #[must_use]
    pub const fn with_id(
        row_id: i64,
        project_or_task: String,
        notes: Option<String>,
        hours: WeekdayHours,
    ) -> Self {
        Self {
            row_id: Some(row_id),
            project_or_task,
            notes,
            hours,
        }
    }

    /// Returns the row total.
    #[must_use]
    pub fn total(&self) -> Hours {
        self.hours.total()
    }
}

/// The timesheet aggregate: a header plus the rows it exclusively owns.
///
/// At most one timesheet exists per `(owner, year, week)`; storage enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timesheet {
    /// Storage identifier. `None` until first persisted.
    pub timesheet_id: Option<i64>,
    /// The owning user with the role and rank used by the visibility policy.
    pub owner: Owner,
    /// The week covered.
    pub week: TimesheetWeek,
    /// Current status.
    pub status: TimesheetStatus,
    /// Rows in the order the owner supplied them.
    pub rows: Vec<TimesheetRow>,
    /// When the timesheet was first created.
    pub created_at: OffsetDateTime,
    /// When the timesheet last changed.
    pub updated_at: OffsetDateTime,
}

impl Timesheet {
    /// Creates an empty draft for `owner` and `week`.
    #[must_use]
    pub const fn new_draft(owner: Owner, week: TimesheetWeek, now: OffsetDateTime) -> Self {
        Self {
            timesheet_id: None,
            owner,
            week,
            status: TimesheetStatus::Draft,
            rows: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the entire row set.
    ///
    /// Prior rows are discarded; nothing is merged by row id.
    pub fn replace_rows(&mut self, rows: Vec<TimesheetRow>) {
        self.rows = rows
            .into_iter()
            .map(|row| TimesheetRow {
                row_id: None,
                ..row
            })
            .collect();
    }

    /// Sets the status and refreshes `updated_at`.
    pub const fn set_status(&mut self, status: TimesheetStatus, now: OffsetDateTime) {
        self.status = status;
        self.updated_at = now;
    }

    /// Refreshes `updated_at`.
    pub const fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }

    /// Returns the sum of all row totals.
    #[must_use]
    pub fn total_hours(&self) -> Hours {
        self.rows.iter().map(TimesheetRow::total).sum()
    }
}
