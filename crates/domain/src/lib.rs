// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod identity;
mod status;
mod types;
mod validation;
mod visibility;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use identity::{Identity, Owner, Rank, Role};
pub use status::{EditPolicy, TimesheetStatus};
pub use types::{Hours, Timesheet, TimesheetRow, TimesheetWeek, WEEKDAYS, WeekdayHours};
pub use validation::{validate_project_or_task, validate_week, validate_year};
pub use visibility::{can_act_on, can_view, is_owner_or_can_view};
