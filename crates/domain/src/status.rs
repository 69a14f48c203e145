// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timesheet status and the owner edit policy.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimesheetStatus {
    /// Being edited by its owner. Initial status.
    #[default]
    Draft,
    /// Handed in for review.
    Submitted,
    /// Accepted by a reviewer. Locked against owner edits.
    Approved,
    /// Rejected by a reviewer. The owner may edit and resubmit.
    Declined,
}

impl TimesheetStatus {
    /// Returns the string representation used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Declined => "Declined",
        }
    }

    /// Returns whether a reviewer may approve or decline from this status.
    #[must_use]
    pub const fn is_reviewable(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted)
    }

    /// Returns whether an owner may request this status through an edit.
    ///
    /// Owners never set a review outcome themselves.
    #[must_use]
    pub const fn is_owner_requestable(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted)
    }

    /// Returns whether an owner may submit from this status.
    ///
    /// Submitted is accepted again so a repeated submit is a no-op.
    #[must_use]
    pub const fn allows_submit(&self) -> bool {
        matches!(self, Self::Draft | Self::Submitted | Self::Declined)
    }
}

impl FromStr for TimesheetStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(Self::Draft),
            "Submitted" => Ok(Self::Submitted),
            "Approved" => Ok(Self::Approved),
            "Declined" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which statuses block owner edits.
///
/// `LockApprovedOnly` keeps submitted timesheets editable while they wait
/// for review. `LockSubmittedAndApproved` freezes them as soon as they are
/// submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditPolicy {
    /// Only approved timesheets are locked.
    #[default]
    LockApprovedOnly,
    /// Submitted and approved timesheets are locked.
    LockSubmittedAndApproved,
}

impl EditPolicy {
    /// Returns whether the owner may replace rows while in `status`.
    #[must_use]
    pub const fn allows_owner_edit(&self, status: TimesheetStatus) -> bool {
        match self {
            Self::LockApprovedOnly => !matches!(status, TimesheetStatus::Approved),
            Self::LockSubmittedAndApproved => !matches!(
                status,
                TimesheetStatus::Approved | TimesheetStatus::Submitted
            ),
        }
    }
}
