// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity extraction at the server boundary.
//!
//! Authentication happens upstream. The upstream layer forwards the
//! verified user id in the `X-User-Id` header; this module resolves it
//! against the user registry into an [`Identity`].

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use timesheet_domain::Identity;
use timesheet_persistence::UserData;
use tracing::{debug, error, warn};

use crate::{AppState, HttpError};

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the calling user.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     RequestIdentity(identity, user): RequestIdentity,
/// ) -> Result<Json<Response>, HttpError> {
///     // identity: Identity
///     // user: UserData
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing, not a number, or names
/// an unknown user.
pub struct RequestIdentity(pub Identity, pub UserData);

impl FromRequestParts<AppState> for RequestIdentity {
    type Rejection = IdentityError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| {
                debug!("Missing {USER_ID_HEADER} header");
                IdentityError::MissingUserHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid {USER_ID_HEADER} header encoding");
                IdentityError::InvalidUserHeader
            })?;

        let user_id: i64 = raw.trim().parse().map_err(|_| {
            warn!(value = raw, "{USER_ID_HEADER} is not a user id");
            IdentityError::InvalidUserHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let user: UserData = persistence
            .get_user(user_id)
            .map_err(|e| {
                error!(error = %e, "User lookup failed");
                IdentityError::Lookup(e.to_string())
            })?
            .ok_or_else(|| {
                warn!(user_id, "Unknown user");
                IdentityError::UnknownUser(user_id)
            })?;
        drop(persistence);

        debug!(
            user_id,
            username = %user.username,
            role = %user.role,
            "Identity resolved"
        );

        Ok(Self(user.identity(), user))
    }
}

/// Identity extraction errors.
#[derive(Debug)]
pub enum IdentityError {
    /// The user id header is missing.
    MissingUserHeader,
    /// The user id header is not a valid id.
    InvalidUserHeader,
    /// No user is registered under the id.
    UnknownUser(i64),
    /// The registry lookup failed.
    Lookup(String),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingUserHeader => (
                StatusCode::UNAUTHORIZED,
                format!("Missing {USER_ID_HEADER} header"),
            ),
            Self::InvalidUserHeader => (
                StatusCode::UNAUTHORIZED,
                format!("Invalid {USER_ID_HEADER} header. Expected a numeric user id"),
            ),
            Self::UnknownUser(user_id) => {
                (StatusCode::UNAUTHORIZED, format!("Unknown user {user_id}"))
            }
            Self::Lookup(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("User lookup failed: {reason}"),
            ),
        };

        HttpError { status, message }.into_response()
    }
}
