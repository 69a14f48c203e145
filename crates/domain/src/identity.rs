// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The acting principal and the owner metadata it is compared against.
//!
//! An [`Identity`] is built once per request from an assertion that an
//! external authentication layer has already verified. Nothing in this
//! crate derives or validates it.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roles a principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Unrestricted visibility; may override any status.
    Admin,
    /// Reviews workers and supervisors of a lower rank.
    Supervisor,
    /// Edits and submits their own timesheets only.
    Worker,
}

impl Role {
    /// Returns the string representation used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Supervisor => "Supervisor",
            Self::Worker => "Worker",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Supervisor" => Ok(Self::Supervisor),
            "Worker" => Ok(Self::Worker),
            _ => Err(DomainError::InvalidRole(format!("Unknown role: {s}"))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supervisor seniority.
///
/// A supervisor of rank `R` may act on supervisors whose rank is strictly
/// below `R`. A supervisor without an assigned rank is [`Rank::UNRANKED`],
/// which is below every assigned rank and therefore acts on no supervisor.
/// Non-supervisors always carry `UNRANKED`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Rank(u16);

impl Rank {
    /// Sentinel for "no rank assigned".
    pub const UNRANKED: Self = Self(0);

    /// Creates a rank from its numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Normalises an optional rank for the given role.
    ///
    /// Only supervisors keep their rank; an absent supervisor rank becomes
    /// `UNRANKED`.
    #[must_use]
    pub fn for_role(role: Role, rank: Option<u16>) -> Self {
        match role {
            Role::Supervisor => rank.map_or(Self::UNRANKED, Self),
            Role::Admin | Role::Worker => Self::UNRANKED,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable snapshot of the acting principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: i64,
    role: Role,
    rank: Rank,
}

impl Identity {
    /// Creates an identity from a verified assertion.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The opaque user identifier
    /// * `role` - The asserted role
    /// * `rank` - The asserted supervisor rank, if any
    #[must_use]
    pub fn new(user_id: i64, role: Role, rank: Option<u16>) -> Self {
        Self {
            user_id,
            role,
            rank: Rank::for_role(role, rank),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the rank (`UNRANKED` for non-supervisors).
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns whether this identity is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns the owner metadata for timesheets this identity creates.
    #[must_use]
    pub const fn as_owner(&self) -> Owner {
        Owner {
            user_id: self.user_id,
            role: self.role,
            rank: self.rank,
        }
    }
}

/// Owner metadata carried by every timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// The owning user.
    pub user_id: i64,
    /// The owner's role.
    pub role: Role,
    /// The owner's rank (`UNRANKED` unless the owner is a supervisor).
    pub rank: Rank,
}

impl Owner {
    /// Creates owner metadata, normalising the rank for the role.
    #[must_use]
    pub fn new(user_id: i64, role: Role, rank: Option<u16>) -> Self {
        Self {
            user_id,
            role,
            rank: Rank::for_role(role, rank),
        }
    }
}
