//! Login and logout.
//!
//! Failed lookups and wrong passwords produce the same response so the
//! endpoint does not reveal which user names exist.

use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use robomart_workflow::ports::{OrderLedger, OrderStore, ProductCatalog, UserDirectory};

use crate::dto::request::LoginRequest;
use crate::dto::response::LoginResponse;
use crate::errors::ApiError;
use crate::session::{
    clear_session_cookie, parse_session_cookie, session_cookie, verify_password,
    SESSION_TIME_TO_LIVE,
};
use crate::state::AppState;

/// `POST /api/login`
pub async fn login<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    Json(request): Json<LoginRequest>,
) -> Result<Response, ApiError>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    let record = state
        .users
        .find_by_user_name(&request.user_name)
        .await
        .map_err(|error| ApiError::internal(error.to_string()))?
        .ok_or_else(|| ApiError::unauthorized("unknown user or wrong password"))?;

    if !verify_password(&request.password, &record.password_hash) {
        tracing::debug!(user_name = %request.user_name, "password verification failed");
        return Err(ApiError::unauthorized("unknown user or wrong password"));
    }

    let (session_id, expires_at) = state.sessions.create(record.user_id);

    tracing::info!(user_id = %record.user_id, "login succeeded");

    let body = Json(LoginResponse {
        user_id: record.user_id.value(),
        expires_at,
    });
    Ok((
        StatusCode::OK,
        [(SET_COOKIE, session_cookie(session_id, SESSION_TIME_TO_LIVE))],
        body,
    )
        .into_response())
}

/// `POST /api/logout`
pub async fn logout<Store, Catalog, Users>(
    State(state): State<AppState<Store, Catalog, Users>>,
    headers: HeaderMap,
) -> Response
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    if let Some(session_id) = headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_session_cookie)
    {
        state.sessions.remove(&session_id);
    }

    (StatusCode::NO_CONTENT, [(SET_COOKIE, clear_session_cookie())]).into_response()
}
