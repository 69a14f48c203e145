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
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    admin_override, list_mine, review, review_action, status_history, submit_mine,
    to_timesheet_info, upsert_mine,
};
pub use request_response::{
    AdminOverrideRequest, ListMineRequest, ListMineResponse, ReviewActionRequest,
    ReviewEntryInfo, ReviewRequest, ReviewResponse, StatusHistoryInfo, StatusHistoryResponse,
    SubmitTimesheetRequest, TimesheetInfo, TimesheetRowInfo, UpsertRowRequest,
    UpsertTimesheetRequest,
};
