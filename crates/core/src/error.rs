// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use timesheet_domain::DomainError;

use crate::store::StoreError;

/// Errors returned by timesheet operations.
///
/// Every variant leaves the stored timesheet unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The target timesheet does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The caller is authenticated but lacks authority for the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// The timesheet's current status does not allow the action.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    /// The timesheet changed concurrently and the action was not applied.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => Self::Conflict(msg),
            StoreError::Backend(msg) => Self::Storage(msg),
        }
    }
}
