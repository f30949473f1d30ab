// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for authenticated routes.
//!
//! Travelers and admins both authenticate with a bearer token issued by
//! signup, login or admin login. The role travels with the session, so
//! admin-only handlers still call `AuthorizationService` themselves.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use travelease_api::{AuthenticatedActor, AuthenticationService};
use travelease_persistence::UserData;

use crate::{AppState, ErrorResponse};

/// Extractor for a signed-in user.
///
/// # Usage
///
/// ```ignore
/// async fn my_trips(
///     AxumState(app_state): AxumState<AppState>,
///     SessionUser(actor, user): SessionUser,
/// ) -> Result<Json<MyTripsResponse>, HttpError> {
///     // actor: AuthenticatedActor
///     // user: UserData
/// }
/// ```
///
/// # Errors
///
/// Rejects with HTTP 401 when the `Authorization` header is missing or
/// malformed, or when the token does not name a live session. Expired
/// sessions are removed during validation.
pub struct SessionUser(pub AuthenticatedActor, pub UserData);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: &str = bearer_token(&parts.headers)?;

        let mut persistence = state.persistence.lock().await;
        let (actor, user): (AuthenticatedActor, UserData) =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;
        drop(persistence);

        debug!(
            user_id = actor.user_id,
            role = %actor.role.as_str(),
            "Session validated"
        );

        Ok(Self(actor, user))
    }
}

/// Reads the token out of an `Authorization: Bearer <token>` header.
///
/// # Errors
///
/// Returns `SessionError` if the header is absent, not ASCII, or uses a
/// different scheme.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, SessionError> {
    let header: &str = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            warn!("Authorization header is not a bearer token");
            SessionError::InvalidAuthorizationHeader
        })
}

/// Why a request could not be tied to a session.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    MissingAuthorizationHeader,
    InvalidAuthorizationHeader,
    /// The token was well formed but did not validate.
    InvalidSession(String),
}

impl SessionError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let body: ErrorResponse = ErrorResponse {
            error: true,
            message: self.message(),
        };
        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}
