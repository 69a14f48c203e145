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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod error;
mod query;
mod store;
mod workflow;

#[cfg(test)]
mod tests;

pub use config::WorkflowConfig;
pub use error::CoreError;
pub use query::{list_mine, review, status_history};
pub use store::{ReviewEntry, ReviewFilter, StoreError, TimesheetStore};
pub use workflow::{UpsertTimesheet, admin_override, review_action, submit_mine, upsert_mine};
