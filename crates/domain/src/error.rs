// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Year is outside the accepted range.
    InvalidYear(String),
    /// Week number is outside the accepted range.
    InvalidWeek(String),
    /// An hours value is negative, non-finite, or exceeds a single day.
    InvalidHours {
        /// The weekday the value was supplied for, if known.
        weekday: Option<time::Weekday>,
        /// Description of the validation error.
        reason: String,
    },
    /// Project or task label is empty.
    InvalidProjectOrTask(String),
    /// Role string is not recognised.
    InvalidRole(String),
    /// Status string is not recognised.
    InvalidStatus(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidYear(msg) => write!(f, "Invalid year: {msg}"),
            Self::InvalidWeek(msg) => write!(f, "Invalid week: {msg}"),
            Self::InvalidHours {
                weekday: Some(weekday),
                reason,
            } => write!(f, "Invalid hours for {weekday}: {reason}"),
            Self::InvalidHours {
                weekday: None,
                reason,
            } => write!(f, "Invalid hours: {reason}"),
            Self::InvalidProjectOrTask(msg) => write!(f, "Invalid project or task: {msg}"),
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidStatus(msg) => write!(f, "Invalid timesheet status: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
