//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in SchoolDesk returns [`AppError`], an
//! [`anyhow::Error`] paired with the HTTP status the route layer should send.
//! The constructors map the error taxonomy onto statuses:
//!
//! | Kind              | Constructor                    | Status |
//! |-------------------|--------------------------------|--------|
//! | Unauthenticated   | [`AppError::unauthenticated`]  | 401    |
//! | Unauthorized      | [`AppError::forbidden`]        | 403    |
//! | NotFound          | [`AppError::not_found`]        | 404    |
//! | Validation        | [`AppError::bad_request`], [`AppError::unprocessable`] | 400 / 422 |
//! | Internal          | [`AppError::internal`]         | 500    |
//!
//! Any error convertible into [`anyhow::Error`] converts into an internal
//! error through `?`. Server errors are logged with their full chain and the
//! response body only says `"Internal server error"`.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// No session, or a session that no longer validates.
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    /// Valid session, but the caller may not perform the action.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    /// The message sent to the client.
    pub fn public_message(&self) -> String {
        if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status.as_u16(),
                error = ?self.error,
                "Request failed with server error"
            );
        }

        let body = Json(json!({
            "error": self.public_message()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_constructor_statuses() {
        assert_eq!(
            AppError::unauthenticated("no session").status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::forbidden("nope").status, StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::not_found(anyhow::anyhow!("gone")).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_request(anyhow::anyhow!("bad")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unprocessable(anyhow::anyhow!("invalid")).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_question_mark_conversion_is_internal() {
        fn parse() -> Result<i32, AppError> {
            Ok("x".parse::<i32>()?)
        }
        let err = parse().unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_predicates() {
        assert!(AppError::unauthenticated("x").is_unauthenticated());
        assert!(!AppError::forbidden("x").is_unauthenticated());
        assert!(AppError::not_found(anyhow::anyhow!("x")).is_not_found());
    }

    #[tokio::test]
    async fn test_client_error_body_carries_message() {
        let response = AppError::not_found(anyhow::anyhow!("Message not found")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Message not found");
    }

    #[tokio::test]
    async fn test_server_error_body_hides_detail() {
        let response =
            AppError::internal(anyhow::anyhow!("connection refused: 10.0.0.3:5432"))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
