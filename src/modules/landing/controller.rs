use axum::{extract::State, http::HeaderMap, response::Redirect};
use schooldesk_auth::LandingRoute;
use tracing::{debug, error, instrument};

use crate::middleware::auth::session_token;
use crate::state::AppState;

/// Redirect to the caller's landing area
///
/// Never fails: a missing or invalid session goes to `/sign-in`, and so does
/// a session store that cannot be reached.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 303, description = "Redirect to /admin, /teacher, /student, /parent or /sign-in")
    ),
    tag = "Landing"
)]
#[instrument(skip_all)]
pub async fn landing(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    let token = session_token(&headers, &state.session_config.cookie_name);

    let identity = match state.auth.validate_session(token.as_deref()).await {
        Ok(identity) => identity,
        Err(err) => {
            error!(error = ?err.error, "Failed to resolve session for landing");
            None
        }
    };

    let route = LandingRoute::for_identity(identity.as_ref());
    debug!(destination = route.path(), "Landing redirect");
    Redirect::to(route.path())
}
