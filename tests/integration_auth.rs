mod common;

use axum::http::{StatusCode, header};
use common::{PASSWORD, body_json, get, post_json, test_app};
use schooldesk_models::UserType;
use serde_json::json;

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = test_app();
    app.add_user("mrs.k", UserType::Teacher).await;

    let response = app
        .send(post_json(
            "/api/auth/login",
            None,
            json!({ "username": "mrs.k", "password": PASSWORD }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("schooldesk_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=86400"));

    let body = body_json(response).await;
    assert_eq!(body["redirect_to"], "/teacher");
    assert_eq!(body["user"]["username"], "mrs.k");
    assert_eq!(body["user"]["user_type"], "TEACHER");
    assert!(body.get("password").is_none());

    let token = body["session_token"].as_str().unwrap();
    assert!(set_cookie.contains(token));
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = test_app();
    app.add_user("mrs.k", UserType::Teacher).await;

    let response = app
        .send(post_json(
            "/api/auth/login",
            None,
            json!({ "username": "mrs.k", "password": "guess" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_login_validation() {
    let app = test_app();

    let missing = app
        .send(post_json("/api/auth/login", None, json!({ "username": "x" })))
        .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let empty = app
        .send(post_json(
            "/api/auth/login",
            None,
            json!({ "username": "", "password": "x" }),
        ))
        .await;
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_me_with_cookie_and_bearer() {
    let app = test_app();
    let parent = app.add_user("mr.p", UserType::Parent).await;
    let token = app.session_for(&parent).await;

    let response = app.send(get("/api/auth/me", Some(&app.cookie(&token)))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user_type"], "PARENT");
    assert_eq!(body["user"]["id"], parent.id.to_string());

    let request = axum::http::Request::builder()
        .uri("/api/auth/me")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    assert_eq!(app.send(request).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_without_session_is_unauthorized() {
    let app = test_app();

    let response = app.send(get("/api/auth/me", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Authentication required");

    let response = app
        .send(get("/api/auth/me", Some("schooldesk_session=forged")))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let app = test_app();

    let response = app.send(post_json("/api/auth/logout", None, json!({}))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(body_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = test_app();
    let student = app.add_user("kid", UserType::Student).await;
    let token = app.session_for(&student).await;
    let cookie = app.cookie(&token);

    let response = app
        .send(post_json("/api/auth/logout", Some(&cookie), json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.store.is_empty().await);

    let response = app.send(get("/api/auth/me", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A second logout with the stale cookie still succeeds.
    let response = app
        .send(post_json("/api/auth/logout", Some(&cookie), json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}
