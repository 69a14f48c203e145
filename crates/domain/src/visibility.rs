// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visibility rules over timesheet owners.

use crate::identity::{Identity, Owner, Rank, Role};

/// Decides whether `identity` may see timesheets owned by someone with
/// the given role and rank.
///
/// Rules, in order:
/// 1. Admins see everything, including admin-owned timesheets.
/// 2. Supervisors see workers, and supervisors of a strictly lower rank.
///    They never see peers, higher-ranked supervisors, or admins.
/// 3. Workers see nothing through this predicate. Their own timesheets
///    are reached through owner scoping instead.
#[must_use]
pub fn can_view(identity: &Identity, owner_role: Role, owner_rank: Rank) -> bool {
    match identity.role() {
        Role::Admin => true,
        Role::Supervisor => match owner_role {
            Role::Worker => true,
            Role::Supervisor => owner_rank < identity.rank(),
            Role::Admin => false,
        },
        Role::Worker => false,
    }
}

/// Gate applied before a supervisor-triggered status transition.
///
/// Same predicate as [`can_view`].
#[must_use]
pub fn can_act_on(identity: &Identity, owner_role: Role, owner_rank: Rank) -> bool {
    can_view(identity, owner_role, owner_rank)
}

/// Owner scoping combined with [`can_view`].
#[must_use]
pub fn is_owner_or_can_view(identity: &Identity, owner: &Owner) -> bool {
    owner.user_id == identity.user_id() || can_view(identity, owner.role, owner.rank)
}
