// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use timesheet_domain::Role;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::conversions::rank_to_column;
use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::queries::users::get_user_by_username;

/// Registers a user.
///
/// The rank is stored only for supervisors.
///
/// # Errors
///
/// Returns an error if the username is taken or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    username: &str,
    role: Role,
    supervisor_rank: Option<u16>,
) -> Result<i64, PersistenceError> {
    let rank: Option<u16> = match role {
        Role::Supervisor => supervisor_rank,
        Role::Admin | Role::Worker => None,
    };

    diesel::insert_into(users::table)
        .values((
            users::username.eq(username),
            users::role.eq(role.as_str()),
            users::supervisor_rank.eq(rank_to_column(rank)),
        ))
        .execute(conn)
        .map_err(|e| match PersistenceError::from(e) {
            PersistenceError::UniqueViolation(_) => {
                PersistenceError::DuplicateUsername(username.to_string())
            }
            other => other,
        })?;

    let user_id: i64 = conn.get_last_insert_rowid()?;
    info!(user_id, username, role = %role, "Created user");
    Ok(user_id)
}

/// Demo accounts: an admin, two ranked supervisors and a worker.
const DEMO_USERS: [(&str, Role, Option<u16>); 4] = [
    ("admin", Role::Admin, None),
    ("super1", Role::Supervisor, Some(1)),
    ("super2", Role::Supervisor, Some(2)),
    ("worker", Role::Worker, None),
];

/// Registers the demo accounts that do not exist yet.
///
/// # Returns
///
/// All demo accounts, existing or new.
///
/// # Errors
///
/// Returns an error if a lookup or insert fails.
pub fn seed_demo_users(conn: &mut SqliteConnection) -> Result<Vec<UserData>, PersistenceError> {
    let mut seeded: Vec<UserData> = Vec::with_capacity(DEMO_USERS.len());
    for (username, role, rank) in DEMO_USERS {
        if let Some(existing) = get_user_by_username(conn, username)? {
            seeded.push(existing);
            continue;
        }
        let user_id: i64 = create_user(conn, username, role, rank)?;
        seeded.push(UserData {
            user_id,
            username: username.to_string(),
            role,
            supervisor_rank: rank,
        });
    }
    Ok(seeded)
}

