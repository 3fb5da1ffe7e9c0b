use axum::{
    Json,
    extract::{Path, State},
};
use schooldesk_core::AppError;
use schooldesk_models::{Class, ClassId};
use tracing::instrument;

use super::scope::ClassScope;
use super::service::ClassService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Classes visible to the caller: all for admins, supervised classes for
/// teachers, their own class for students and their children's classes for
/// parents.
#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Visible classes ordered by name", body = Vec<Class>),
        (status = 401, description = "No valid session")
    ),
    tag = "Classes",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Class>>, AppError> {
    let scope = ClassScope::for_identity(auth_user.identity());
    let classes = ClassService::list_classes(&state.db, scope).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(
        ("id" = ClassId, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class details", body = Class),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Class not found or not visible")
    ),
    tag = "Classes",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ClassId>,
) -> Result<Json<Class>, AppError> {
    let scope = ClassScope::for_identity(auth_user.identity());
    let class = ClassService::get_class(&state.db, id, scope).await?;
    Ok(Json(class))
}
