use axum::{Json, extract::State};
use schooldesk_core::AppError;
use schooldesk_models::Grade;
use tracing::instrument;

use super::service::GradeService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/grades",
    responses(
        (status = 200, description = "All grade levels, lowest first", body = Vec<Grade>),
        (status = 401, description = "No valid session")
    ),
    tag = "Grades",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_grades(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Grade>>, AppError> {
    let grades = GradeService::list_grades(&state.db).await?;
    Ok(Json(grades))
}
