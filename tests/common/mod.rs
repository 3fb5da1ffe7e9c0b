#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use schooldesk::modules::messages::repository::{MemoryMessageRepository, MessageRepository};
use schooldesk::modules::users::repository::MemoryUserRepository;
use schooldesk::router::init_router;
use schooldesk::state::AppState;
use schooldesk_auth::{AuthService, MemorySessionStore, SessionStore};
use schooldesk_config::{CorsConfig, SessionConfig, SessionStoreKind};
use schooldesk_core::hash_password_with_cost;
use schooldesk_models::{Message, MessageId, User, UserId, UserType};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse battery";

/// The full router over in-memory stores. The database pool is lazy and
/// never connected, so only routes that skip Postgres are usable.
pub struct TestApp {
    pub router: Router,
    pub auth: AuthService,
    pub store: Arc<MemorySessionStore>,
    pub users: Arc<MemoryUserRepository>,
    pub messages: Arc<MemoryMessageRepository>,
    pub session_config: SessionConfig,
}

pub fn session_config() -> SessionConfig {
    SessionConfig {
        store: SessionStoreKind::Memory,
        ..SessionConfig::default()
    }
}

pub fn build_state(
    store: Arc<dyn SessionStore>,
    users: Arc<MemoryUserRepository>,
    messages: Arc<dyn MessageRepository>,
) -> AppState {
    let session_config = session_config();
    AppState {
        db: PgPoolOptions::new()
            .connect_lazy("postgres://localhost/schooldesk_test")
            .unwrap(),
        auth: AuthService::new(store, &session_config),
        users,
        messages,
        session_config,
        cors_config: CorsConfig::from_list("http://localhost:5173"),
    }
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemorySessionStore::new());
    let users = Arc::new(MemoryUserRepository::new());
    let messages = Arc::new(MemoryMessageRepository::new());

    let state = build_state(store.clone(), users.clone(), messages.clone());
    TestApp {
        auth: state.auth.clone(),
        session_config: state.session_config.clone(),
        router: init_router(state),
        store,
        users,
        messages,
    }
}

impl TestApp {
    pub async fn add_user(&self, username: &str, user_type: UserType) -> User {
        let hash = hash_password_with_cost(PASSWORD, 4).unwrap();
        self.users.add(username, &hash, user_type, None).await
    }

    /// Opens a session for `user` directly through the auth service.
    pub async fn session_for(&self, user: &User) -> String {
        self.auth
            .create_session(user.id, user.user_type)
            .await
            .unwrap()
            .token
            .into_string()
    }

    pub fn cookie(&self, token: &str) -> String {
        format!("{}={}", self.session_config.cookie_name, token)
    }

    pub async fn unread_message(&self, sender: UserId, recipient: UserId) -> MessageId {
        let message = Message {
            id: MessageId::new(),
            sender_id: sender,
            recipient_id: recipient,
            subject: "Parent evening".to_string(),
            body: "Thursday at 6pm in the main hall.".to_string(),
            is_read: false,
            read_at: None,
            created_at: Utc::now() - Duration::minutes(5),
        };
        let id = message.id;
        self.messages.put(message).await;
        id
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
}
