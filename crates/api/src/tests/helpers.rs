// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use timesheet_domain::Identity;
use timesheet_persistence::{Persistence, UserData};

use crate::{UpsertRowRequest, UpsertTimesheetRequest};

/// An in-memory database seeded with the demo users.
pub struct Fixture {
    pub db: Persistence,
    pub admin: Identity,
    pub super1: Identity,
    pub super2: Identity,
    pub worker: Identity,
}

pub fn fixture() -> Fixture {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();
    let users: Vec<UserData> = db.seed_demo_users().unwrap();
    Fixture {
        admin: users[0].identity(),
        super1: users[1].identity(),
        super2: users[2].identity(),
        worker: users[3].identity(),
        db,
    }
}

pub fn row_request(task: &str, monday: f64) -> UpsertRowRequest {
    UpsertRowRequest {
        project_or_task: String::from(task),
        monday,
        ..UpsertRowRequest::default()
    }
}

pub fn upsert_request(year: u16, week: u8, rows: Vec<UpsertRowRequest>) -> UpsertTimesheetRequest {
    UpsertTimesheetRequest {
        year,
        week,
        rows,
        status: None,
    }
}
