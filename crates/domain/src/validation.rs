// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Validates that a year is a reasonable calendar year.
///
/// # Errors
///
/// Returns an error if the year is not between 1900 and 2200.
pub fn validate_year(year: u16) -> Result<(), DomainError> {
    if !(1900..=2200).contains(&year) {
        return Err(DomainError::InvalidYear(format!(
            "Year must be between 1900 and 2200, got {year}"
        )));
    }
    Ok(())
}

/// Validates that a week number can exist in a year.
///
/// No calendar computation is done: week 53 is accepted for every year.
///
/// # Errors
///
/// Returns an error if the week is not between 1 and 53.
pub fn validate_week(week: u8) -> Result<(), DomainError> {
    if !(1..=53).contains(&week) {
        return Err(DomainError::InvalidWeek(format!(
            "Week must be between 1 and 53, got {week}"
        )));
    }
    Ok(())
}

/// Validates a row's project or task label.
///
/// # Errors
///
/// Returns an error if the label is empty or whitespace only.
pub fn validate_project_or_task(project_or_task: &str) -> Result<(), DomainError> {
    if project_or_task.trim().is_empty() {
        return Err(DomainError::InvalidProjectOrTask(String::from(
            "Project or task cannot be empty",
        )));
    }
    Ok(())
}
