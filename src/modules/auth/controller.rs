use axum::{Json, extract::State, http::HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use schooldesk_core::AppError;
use schooldesk_models::{LoginRequest, LoginResponse, LogoutResponse, MeResponse};
use tracing::instrument;
use utoipa::ToSchema;

use super::cookies::{removal_cookie, session_cookie};
use super::service::LoginService;
use crate::middleware::auth::{AuthUser, session_token};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in and receive a session cookie
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created; the token is also set as a cookie", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let response = LoginService::login(state.users.as_ref(), &state.auth, dto).await?;
    let jar = jar.add(session_cookie(
        &state.session_config,
        response.session_token.clone(),
    ));

    Ok((jar, Json(response)))
}

/// End the current session. Succeeds without a session too.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session ended and cookie cleared", body = LogoutResponse),
        (status = 500, description = "Session store unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, headers, jar))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), AppError> {
    let token = session_token(&headers, &state.session_config.cookie_name);
    LoginService::logout(&state.auth, token.as_deref()).await?;

    let jar = jar.add(removal_cookie(&state.session_config));
    Ok((jar, Json(LogoutResponse { success: true })))
}

/// The caller's identity
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current session and user", body = MeResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let me = LoginService::me(state.users.as_ref(), auth_user).await?;
    Ok(Json(me))
}
