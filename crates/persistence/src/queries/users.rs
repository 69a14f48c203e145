// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::conversions::user_from_row;
use crate::data_models::{UserData, UserRow};
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Retrieves a user by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn get_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    debug!(user_id, "Looking up user");

    users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user: {e}")))?
        .map(user_from_row)
        .transpose()
}

/// Retrieves a user by exact username.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is malformed.
pub fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserData>, PersistenceError> {
    users::table
        .filter(users::username.eq(username))
        .select(UserRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_by_username: {e}")))?
        .map(user_from_row)
        .transpose()
}

/// Lists all users ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is malformed.
pub fn list_users(conn: &mut SqliteConnection) -> Result<Vec<UserData>, PersistenceError> {
    users::table
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_users: {e}")))?
        .into_iter()
        .map(user_from_row)
        .collect()
}
