mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use common::{body_json, build_state, get, location, post_json, test_app};
use schooldesk::modules::messages::repository::MemoryMessageRepository;
use schooldesk::modules::users::repository::MemoryUserRepository;
use schooldesk::router::init_router;
use schooldesk_auth::{Session, SessionStore, hash_token};
use schooldesk_core::AppError;
use schooldesk_models::{UserId, UserType};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_each_user_type_lands_in_its_area() {
    let app = test_app();
    let cases = [
        (UserType::Admin, "/admin"),
        (UserType::Teacher, "/teacher"),
        (UserType::Student, "/student"),
        (UserType::Parent, "/parent"),
    ];

    for (user_type, expected) in cases {
        let user = app.add_user(&format!("{user_type}-user"), user_type).await;
        let token = app.session_for(&user).await;

        let response = app.send(get("/", Some(&app.cookie(&token)))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), expected);
    }
}

#[tokio::test]
async fn test_known_token_lands_teacher() {
    let app = test_app();
    let now = Utc::now();
    app.store
        .insert(&Session {
            token_hash: hash_token("tok-1"),
            user_id: UserId::new(),
            user_type: UserType::Teacher,
            created_at: now,
            expires_at: now + Duration::hours(1),
        })
        .await
        .unwrap();

    let response = app.send(get("/", Some("schooldesk_session=tok-1"))).await;
    assert_eq!(location(&response), "/teacher");
}

#[tokio::test]
async fn test_no_session_goes_to_sign_in() {
    let app = test_app();

    let response = app.send(get("/", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/sign-in");

    let response = app.send(get("/", Some("schooldesk_session=unknown"))).await;
    assert_eq!(location(&response), "/sign-in");
}

#[tokio::test]
async fn test_destroyed_session_goes_to_sign_in() {
    let app = test_app();
    let admin = app.add_user("root", UserType::Admin).await;
    let token = app.session_for(&admin).await;
    app.auth.destroy_session(Some(&token)).await.unwrap();

    let response = app.send(get("/", Some(&app.cookie(&token)))).await;
    assert_eq!(location(&response), "/sign-in");
}

#[derive(Debug)]
struct UnreachableStore;

#[async_trait]
impl SessionStore for UnreachableStore {
    async fn insert(&self, _: &Session) -> Result<(), AppError> {
        Err(AppError::internal(anyhow::anyhow!("connection refused")))
    }
    async fn find(&self, _: &str) -> Result<Option<Session>, AppError> {
        Err(AppError::internal(anyhow::anyhow!("connection refused")))
    }
    async fn delete(&self, _: &str) -> Result<bool, AppError> {
        Err(AppError::internal(anyhow::anyhow!("connection refused")))
    }
    async fn purge_expired(&self, _: DateTime<Utc>) -> Result<u64, AppError> {
        Err(AppError::internal(anyhow::anyhow!("connection refused")))
    }
}

#[tokio::test]
async fn test_store_failure_goes_to_sign_in_but_api_reports_500() {
    let state = build_state(
        Arc::new(UnreachableStore),
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemoryMessageRepository::new()),
    );
    let router = init_router(state);

    let response = router
        .clone()
        .oneshot(get("/", Some("schooldesk_session=tok-1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/sign-in");

    let response = router
        .oneshot(get("/api/auth/me", Some("schooldesk_session=tok-1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Internal server error");
}

#[tokio::test]
async fn test_logout_reports_store_failure() {
    let state = build_state(
        Arc::new(UnreachableStore),
        Arc::new(MemoryUserRepository::new()),
        Arc::new(MemoryMessageRepository::new()),
    );
    let router = init_router(state);

    let response = router
        .oneshot(post_json(
            "/api/auth/logout",
            Some("schooldesk_session=tok-1"),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Internal server error" })
    );
}
