use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use schooldesk_core::{AppError, Paginated, PaginationParams};
use schooldesk_models::{MessageId, MessageView, SendMessageDto, UnreadCountResponse};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::messages::service::MessageService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/messages",
    params(
        ("limit" = Option<i64>, Query, description = "Items per page (1-100, default 20)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "1-indexed page number")
    ),
    responses(
        (status = 200, description = "Messages received by the caller, newest first", body = Paginated<MessageView>),
        (status = 401, description = "No valid session")
    ),
    tag = "Messages",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_inbox(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<MessageView>>, AppError> {
    let page = MessageService::list_inbox(state.messages.as_ref(), auth_user.user_id(), &params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/messages/sent",
    params(
        ("limit" = Option<i64>, Query, description = "Items per page (1-100, default 20)"),
        ("offset" = Option<i64>, Query, description = "Items to skip"),
        ("page" = Option<i64>, Query, description = "1-indexed page number")
    ),
    responses(
        (status = 200, description = "Messages sent by the caller, newest first", body = Paginated<MessageView>),
        (status = 401, description = "No valid session")
    ),
    tag = "Messages",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_sent(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<MessageView>>, AppError> {
    let page = MessageService::list_sent(state.messages.as_ref(), auth_user.user_id(), &params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/messages/unread-count",
    responses(
        (status = 200, description = "Unread messages addressed to the caller", body = UnreadCountResponse),
        (status = 401, description = "No valid session")
    ),
    tag = "Messages",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn unread_count(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let count = MessageService::unread_count(state.messages.as_ref(), auth_user.user_id()).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Opening a message as its recipient marks it read.
#[utoipa::path(
    get,
    path = "/api/messages/{id}",
    params(
        ("id" = MessageId, Path, description = "Message ID")
    ),
    responses(
        (status = 200, description = "The message, as seen by the caller", body = MessageView),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Message not found")
    ),
    tag = "Messages",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<MessageId>,
) -> Result<Json<MessageView>, AppError> {
    let message = MessageService::get_message_by_id(state.messages.as_ref(), id, auth_user.user_id()).await?;
    Ok(Json(message))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = SendMessageDto,
    responses(
        (status = 201, description = "Message sent", body = MessageView),
        (status = 400, description = "Invalid request or message addressed to self"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Recipient not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Messages",
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn send_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SendMessageDto>,
) -> Result<(StatusCode, Json<MessageView>), AppError> {
    let message = MessageService::send_message(
        state.messages.as_ref(),
        state.users.as_ref(),
        auth_user.user_id(),
        dto,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(message)))
}
