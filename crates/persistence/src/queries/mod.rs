// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `users`: user registry lookups
//! - `timesheets`: aggregate loading and listing
//! - `audit`: status history

pub mod audit;
pub mod timesheets;
pub mod users;
