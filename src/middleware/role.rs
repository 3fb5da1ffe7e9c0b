//! User-type authorization.
//!
//! Route guards run as middleware (`require_admin`). They authenticate
//! first, so a request without a session is rejected with 401 and a session
//! of the wrong type with 403.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use schooldesk_core::AppError;
use schooldesk_models::UserType;

use crate::metrics::track_authorization_denied;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Lets the request through only for the given user types. The resolved
/// [`AuthUser`] is stored in the request extensions for the handler.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed: &[UserType],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user, allowed)?;

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    require_roles(State(state), req, next, &[UserType::Admin])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub fn check_any_role(auth_user: &AuthUser, allowed: &[UserType]) -> Result<(), AppError> {
    let user_type = auth_user.user_type();
    if allowed.contains(&user_type) {
        return Ok(());
    }

    track_authorization_denied(user_type);
    Err(AppError::forbidden(format!(
        "Access denied for user type {user_type}"
    )))
}
