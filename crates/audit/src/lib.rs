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
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use timesheet_domain::{Identity, Role, TimesheetStatus};

/// Action names recorded in the audit trail.
pub mod actions {
    /// A timesheet was created by its owner.
    pub const CREATE_TIMESHEET: &str = "CreateTimesheet";
    /// An existing timesheet's rows were replaced by its owner.
    pub const UPDATE_TIMESHEET: &str = "UpdateTimesheet";
    /// The owner submitted the timesheet for review.
    pub const SUBMIT_TIMESHEET: &str = "SubmitTimesheet";
    /// A reviewer approved the timesheet.
    pub const APPROVE_TIMESHEET: &str = "ApproveTimesheet";
    /// A reviewer declined the timesheet.
    pub const DECLINE_TIMESHEET: &str = "DeclineTimesheet";
    /// An admin forced the status.
    pub const OVERRIDE_STATUS: &str = "OverrideStatus";
}

/// The principal that performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user.
    pub user_id: i64,
    /// The role the user acted under.
    pub role: Role,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}

impl From<&Identity> for Actor {
    fn from(identity: &Identity) -> Self {
        Self::new(identity.user_id(), identity.role())
    }
}

/// A free-text reason supplied with an action, such as a decline reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// The reason as entered by the actor.
    pub reason: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(reason: String) -> Self {
        Self { reason }
    }

    /// Creates a cause from an optional reason, dropping blank input.
    #[must_use]
    pub fn from_optional(reason: Option<&str>) -> Option<Self> {
        reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| Self::new(r.to_string()))
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (see [`actions`]).
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub fn new(name: &str, details: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            details,
        }
    }
}

/// An immutable record of one accepted timesheet transition.
///
/// Every successful create, edit, submit, review or override produces
/// exactly one event, persisted in the same unit of work as the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Storage identifier. `None` until persisted.
    pub event_id: Option<i64>,
    /// The timesheet the event belongs to. `None` until the timesheet has
    /// been assigned an id.
    pub timesheet_id: Option<i64>,
    /// Who performed the action.
    pub actor: Actor,
    /// What was done.
    pub action: Action,
    /// Why, when the actor gave a reason.
    pub cause: Option<Cause>,
    /// Status before the transition. `None` when the timesheet was created.
    pub before: Option<TimesheetStatus>,
    /// Status after the transition.
    pub after: TimesheetStatus,
    /// When the transition was accepted.
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `action` - The action that was performed
    /// * `cause` - The reason for the change, if one was given
    /// * `before` - The status before the transition
    /// * `after` - The status after the transition
    /// * `recorded_at` - When the change was accepted
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        cause: Option<Cause>,
        before: Option<TimesheetStatus>,
        after: TimesheetStatus,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            timesheet_id: None,
            actor,
            action,
            cause,
            before,
            after,
            recorded_at,
        }
    }

    /// Returns a copy bound to `timesheet_id`.
    #[must_use]
    pub fn for_timesheet(&self, timesheet_id: i64) -> Self {
        Self {
            timesheet_id: Some(timesheet_id),
            ..self.clone()
        }
    }

    /// Returns whether the event changed the status.
    #[must_use]
    pub fn is_status_change(&self) -> bool {
        self.before != Some(self.after)
    }
}
