// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use thiserror::Error;
use timesheet::CoreError;
use timesheet_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The caller could not be identified.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The caller lacks authority for the action.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// The timesheet's status does not allow the action.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A human-readable description of the conflict with the status.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A concurrent write could not be reconciled.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: String = match err {
        DomainError::InvalidYear(_) => String::from("year"),
        DomainError::InvalidWeek(_) => String::from("week"),
        DomainError::InvalidHours {
            weekday: Some(weekday),
            ..
        } => weekday.to_string().to_lowercase(),
        DomainError::InvalidHours { weekday: None, .. } => String::from("hours"),
        DomainError::InvalidProjectOrTask(_) => String::from("project_or_task"),
        DomainError::InvalidRole(_) => String::from("role"),
        DomainError::InvalidStatus(_) => String::from("status"),
    };
    ApiError::InvalidInput { field, message }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Timesheet"),
            message,
        },
        CoreError::Forbidden(message) => ApiError::Forbidden { message },
        CoreError::InvalidState(message) => ApiError::InvalidState { message },
        CoreError::Conflict(message) => ApiError::Conflict { message },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Storage(msg) => {
            tracing::error!(error = %msg, "Timesheet store failed");
            ApiError::Internal {
                message: format!("Storage error: {msg}"),
            }
        }
    }
}
