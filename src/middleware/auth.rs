use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use schooldesk_auth::Identity;
use schooldesk_core::AppError;
use schooldesk_models::{UserId, UserType};

use crate::state::AppState;

/// The caller of a request with a valid session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }

    pub fn user_type(&self) -> UserType {
        self.0.user_type
    }

    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

/// Reads the session token from the session cookie, falling back to an
/// `Authorization: Bearer` header. Blank values count as absent.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    let from_cookie = jar
        .get(cookie_name)
        .map(|cookie| cookie.value().trim())
        .filter(|token| !token.is_empty());
    if let Some(token) = from_cookie {
        return Some(token.to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by a role guard that already resolved the session.
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(*auth_user);
        }

        let token = session_token(&parts.headers, &state.session_config.cookie_name);
        let identity = state.auth.require_auth(token.as_deref()).await?;

        Ok(AuthUser(identity))
    }
}
