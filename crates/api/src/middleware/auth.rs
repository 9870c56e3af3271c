//! Authentication gates: session cookies for the customer surface and
//! a shared API key for the robot surface.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use robomart_domain::order::UserId;

use crate::errors::ApiError;
use crate::session::{parse_session_cookie, SessionStore};

pub const ROBOT_API_KEY_HEADER: &str = "x-api-key";

// =============================================================================
// CurrentUser
// =============================================================================

/// The authenticated user, inserted by [`require_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<State> FromRequestParts<State> for CurrentUser
where
    State: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &State,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| ApiError::unauthorized("no authenticated session"))
    }
}

// =============================================================================
// Session Gate
// =============================================================================

/// Rejects requests without a live session cookie and exposes the
/// session's user as [`CurrentUser`].
pub async fn require_session(
    State(sessions): State<Arc<SessionStore>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = request
        .headers()
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_session_cookie)
        .ok_or_else(|| ApiError::unauthorized("missing session cookie"))?;

    let session = sessions
        .resolve(&session_id)
        .ok_or_else(|| ApiError::unauthorized("session expired or unknown"))?;

    request.extensions_mut().insert(CurrentUser(session.user_id));
    Ok(next.run(request).await)
}

// =============================================================================
// Robot Gate
// =============================================================================

/// The key robots must present in the `x-api-key` header.
#[derive(Clone)]
pub struct RobotApiKey(pub Arc<str>);

/// Rejects robot requests without the configured API key.
pub async fn require_robot_key(
    State(RobotApiKey(expected)): State<RobotApiKey>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(ROBOT_API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if presented.is_empty() || presented != expected.as_ref() {
        return Err(ApiError::forbidden("invalid or missing API key"));
    }

    Ok(next.run(request).await)
}
