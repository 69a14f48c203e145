// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutations.
//!
//! - `users`: user registry writes
//! - `timesheets`: transactional aggregate saves
//! - `audit`: audit event inserts

pub mod audit;
pub mod timesheets;
pub mod users;
