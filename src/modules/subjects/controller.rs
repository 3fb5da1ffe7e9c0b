use axum::{Json, extract::State, http::StatusCode};
use schooldesk_core::AppError;
use schooldesk_models::{CreateSubjectDto, Subject};
use tracing::{info, instrument};

use super::service::SubjectService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/subjects",
    responses(
        (status = 200, description = "All subjects ordered by name", body = Vec<Subject>),
        (status = 401, description = "No valid session")
    ),
    tag = "Subjects",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_subjects(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = SubjectService::list_subjects(&state.db).await?;
    Ok(Json(subjects))
}

/// Guarded by `require_admin` in the router.
#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Duplicate name or malformed body"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Caller is not an admin"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Subjects",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create_subject(&state.db, dto).await?;
    info!(subject_id = %subject.id, created_by = %auth_user.user_id(), "Subject created");

    Ok((StatusCode::CREATED, Json(subject)))
}
