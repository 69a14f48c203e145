// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for timesheets.
//!
//! Provides the [`timesheet::TimesheetStore`] implementation used by the
//! server, together with the user registry the server resolves identities
//! from.
//!
//! ## Storage guarantees
//!
//! - At most one timesheet per `(user, year, week)`, enforced by a unique
//!   constraint. A create that loses the race is applied to the existing
//!   timesheet unless it is Approved.
//! - Header, full row set and the audit event are written in a single
//!   immediate transaction.
//! - Rows cascade with their timesheet; foreign key enforcement is verified
//!   at startup.
//!
//! ## Testing
//!
//! Every call to [`Persistence::new_in_memory`] gets its own shared-cache
//! in-memory database, so tests never see each other's data.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use timesheet::{ReviewEntry, ReviewFilter, StoreError, TimesheetStore};
use timesheet_audit::AuditEvent;
use timesheet_domain::{Identity, Role, Timesheet, TimesheetWeek};
use tracing::info;

mod backend;
mod conversions;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::UserData;
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Alias kept for call sites that name the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:timesheets_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a database file, creating it if
    /// needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    // ========================================================================
    // User registry
    // ========================================================================

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the username is taken or the insert fails.
    pub fn create_user(
        &mut self,
        username: &str,
        role: Role,
        supervisor_rank: Option<u16>,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, username, role, supervisor_rank)
    }

    /// Retrieves a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Retrieves a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(&mut self) -> Result<Vec<UserData>, PersistenceError> {
        queries::users::list_users(&mut self.conn)
    }

    /// Registers the demo accounts (`admin`, `super1`, `super2`, `worker`)
    /// that are missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup or insert fails.
    pub fn seed_demo_users(&mut self) -> Result<Vec<UserData>, PersistenceError> {
        mutations::users::seed_demo_users(&mut self.conn)
    }

    /// Registers the demo accounts and gives the demo worker a Draft
    /// "Onboarding" timesheet for the week containing `now`, unless the
    /// worker already has one for that week.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding the users or the timesheet fails.
    pub fn seed_demo_data(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<Vec<UserData>, PersistenceError> {
        let users: Vec<UserData> = self.seed_demo_users()?;
        if let Some(worker) = users.iter().find(|u| u.role == Role::Worker) {
            let seeded: Option<i64> = mutations::timesheets::seed_onboarding_timesheet(
                &mut self.conn,
                &worker.identity(),
                now,
            )?;
            if let Some(timesheet_id) = seeded {
                info!(timesheet_id, username = %worker.username, "Seeded demo timesheet");
            }
        }
        Ok(users)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Counts all stored audit events.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_audit_events(&mut self) -> Result<i64, PersistenceError> {
        queries::audit::count_audit_events(&mut self.conn)
    }
}

impl TimesheetStore for Persistence {
    fn find_by_owner_and_week(
        &mut self,
        owner_id: i64,
        week: TimesheetWeek,
    ) -> Result<Option<Timesheet>, StoreError> {
        Ok(queries::timesheets::find_by_owner_and_week(
            &mut self.conn,
            owner_id,
            week,
        )?)
    }

    fn find_by_id(&mut self, timesheet_id: i64) -> Result<Option<Timesheet>, StoreError> {
        Ok(queries::timesheets::find_by_id(&mut self.conn, timesheet_id)?)
    }

    fn list_by_owner(
        &mut self,
        owner_id: i64,
        year: Option<u16>,
        week: Option<u8>,
    ) -> Result<Vec<Timesheet>, StoreError> {
        Ok(queries::timesheets::list_by_owner(
            &mut self.conn,
            owner_id,
            year,
            week,
        )?)
    }

    fn list_all(
        &mut self,
        viewer: &Identity,
        filter: &ReviewFilter,
    ) -> Result<Vec<ReviewEntry>, StoreError> {
        Ok(queries::timesheets::list_for_review(
            &mut self.conn,
            viewer,
            filter,
        )?)
    }

    fn save(
        &mut self,
        timesheet: &Timesheet,
        event: &AuditEvent,
    ) -> Result<Timesheet, StoreError> {
        let timesheet_id: i64 =
            mutations::timesheets::save_timesheet(&mut self.conn, timesheet, event)?;

        queries::timesheets::find_by_id(&mut self.conn, timesheet_id)?.ok_or_else(|| {
            StoreError::Backend(format!("Timesheet {timesheet_id} missing after save"))
        })
    }

    fn list_status_history(&mut self, timesheet_id: i64) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(queries::audit::list_status_history(
            &mut self.conn,
            timesheet_id,
        )?)
    }
}
