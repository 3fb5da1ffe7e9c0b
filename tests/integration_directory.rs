//! Postgres-backed routes. Run with `cargo test -- --ignored` against a
//! database reachable through `DATABASE_URL`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use schooldesk::modules::messages::repository::PgMessageRepository;
use schooldesk::modules::users::repository::PgUserRepository;
use schooldesk::router::init_router;
use schooldesk::state::AppState;
use schooldesk_auth::AuthService;
use schooldesk_config::CorsConfig;
use schooldesk_core::hash_password_with_cost;
use schooldesk_db::PgSessionStore;
use schooldesk_models::{ClassId, GradeId, UserId, UserType};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

struct Directory {
    router: axum::Router,
    auth: AuthService,
    admin: UserId,
    teacher: UserId,
    student: UserId,
    parent: UserId,
    supervised: ClassId,
    other: ClassId,
}

async fn insert_user(
    pool: &PgPool,
    username: &str,
    user_type: UserType,
    class_id: Option<ClassId>,
    parent_id: Option<UserId>,
) -> UserId {
    let hash = hash_password_with_cost("password123", 4).unwrap();
    sqlx::query_scalar::<_, UserId>(
        r#"INSERT INTO users (username, password, user_type, first_name, last_name, class_id, parent_id)
           VALUES ($1, $2, $3, $1, 'Test', $4, $5)
           RETURNING id"#,
    )
    .bind(username)
    .bind(hash)
    .bind(user_type)
    .bind(class_id)
    .bind(parent_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn insert_class(pool: &PgPool, name: &str, grade: GradeId, supervisor: Option<UserId>) -> ClassId {
    sqlx::query_scalar::<_, ClassId>(
        "INSERT INTO classes (name, capacity, grade_id, supervisor_id) VALUES ($1, 30, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(grade)
    .bind(supervisor)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn setup(pool: PgPool) -> Directory {
    let grade = sqlx::query_scalar::<_, GradeId>("INSERT INTO grades (level) VALUES (3) RETURNING id")
        .fetch_one(&pool)
        .await
        .unwrap();

    let admin = insert_user(&pool, "admin", UserType::Admin, None, None).await;
    let teacher = insert_user(&pool, "teacher", UserType::Teacher, None, None).await;
    let supervised = insert_class(&pool, "3A", grade, Some(teacher)).await;
    let other = insert_class(&pool, "3B", grade, None).await;
    let parent = insert_user(&pool, "parent", UserType::Parent, None, None).await;
    let student = insert_user(&pool, "student", UserType::Student, Some(supervised), Some(parent)).await;

    let session_config = common::session_config();
    let auth = AuthService::new(Arc::new(PgSessionStore::new(pool.clone())), &session_config);
    let state = AppState {
        auth: auth.clone(),
        users: Arc::new(PgUserRepository::new(pool.clone())),
        messages: Arc::new(PgMessageRepository::new(pool.clone())),
        db: pool,
        session_config,
        cors_config: CorsConfig::from_list("http://localhost:5173"),
    };

    Directory {
        router: init_router(state),
        auth,
        admin,
        teacher,
        student,
        parent,
        supervised,
        other,
    }
}

impl Directory {
    async fn cookie(&self, user_id: UserId, user_type: UserType) -> String {
        let issued = self.auth.create_session(user_id, user_type).await.unwrap();
        format!("schooldesk_session={}", issued.token.as_str())
    }

    async fn class_ids(&self, cookie: &str) -> Vec<String> {
        let response = self.router.clone().oneshot(get("/api/classes", Some(cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_classes_are_filtered_by_user_type(pool: PgPool) {
    let dir = setup(pool).await;
    let supervised = dir.supervised.to_string();
    let other = dir.other.to_string();

    let admin = dir.cookie(dir.admin, UserType::Admin).await;
    assert_eq!(dir.class_ids(&admin).await, vec![supervised.clone(), other.clone()]);

    let teacher = dir.cookie(dir.teacher, UserType::Teacher).await;
    assert_eq!(dir.class_ids(&teacher).await, vec![supervised.clone()]);

    let student = dir.cookie(dir.student, UserType::Student).await;
    assert_eq!(dir.class_ids(&student).await, vec![supervised.clone()]);

    let parent = dir.cookie(dir.parent, UserType::Parent).await;
    assert_eq!(dir.class_ids(&parent).await, vec![supervised]);

    let response = dir
        .router
        .clone()
        .oneshot(get(&format!("/api/classes/{other}"), Some(&teacher)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = dir
        .router
        .clone()
        .oneshot(get(&format!("/api/classes/{other}"), Some(&admin)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_subjects_and_grades(pool: PgPool) {
    let dir = setup(pool).await;
    let admin = dir.cookie(dir.admin, UserType::Admin).await;

    for name in ["Science", "Art"] {
        let response = dir
            .router
            .clone()
            .oneshot(post_json("/api/subjects", Some(&admin), json!({ "name": name })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let duplicate = dir
        .router
        .clone()
        .oneshot(post_json("/api/subjects", Some(&admin), json!({ "name": "Art" })))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);

    let student = dir.cookie(dir.student, UserType::Student).await;
    let subjects = body_json(dir.router.clone().oneshot(get("/api/subjects", Some(&student))).await.unwrap()).await;
    let names: Vec<_> = subjects.as_array().unwrap().iter().map(|s| s["name"].clone()).collect();
    assert_eq!(names, vec![json!("Art"), json!("Science")]);

    let grades = body_json(dir.router.clone().oneshot(get("/api/grades", Some(&student))).await.unwrap()).await;
    assert_eq!(grades[0]["level"], 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_message_read_state_in_postgres(pool: PgPool) {
    let dir = setup(pool.clone()).await;
    let teacher = dir.cookie(dir.teacher, UserType::Teacher).await;
    let parent = dir.cookie(dir.parent, UserType::Parent).await;
    let student = dir.cookie(dir.student, UserType::Student).await;

    let sent = body_json(
        dir.router
            .clone()
            .oneshot(post_json(
                "/api/messages",
                Some(&teacher),
                json!({ "recipient_id": dir.parent, "subject": "Trip", "body": "Permission slip due Friday." }),
            ))
            .await
            .unwrap(),
    )
    .await;
    let uri = format!("/api/messages/{}", sent["id"].as_str().unwrap());

    let stranger = dir.router.clone().oneshot(get(&uri, Some(&student))).await.unwrap();
    assert_eq!(stranger.status(), StatusCode::NOT_FOUND);

    let first = body_json(dir.router.clone().oneshot(get(&uri, Some(&parent))).await.unwrap()).await;
    let second = body_json(dir.router.clone().oneshot(get(&uri, Some(&parent))).await.unwrap()).await;
    assert_eq!(first["is_read"], true);
    assert_eq!(first["read_at"], second["read_at"]);

    let unread: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE is_read = FALSE")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(unread, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_postgres_sessions_survive_router_round_trip(pool: PgPool) {
    let dir = setup(pool).await;

    let response = dir
        .router
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            None,
            json!({ "username": "teacher", "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["session_token"].as_str().unwrap().to_string();
    let cookie = format!("schooldesk_session={token}");

    let landing = dir.router.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(common::location(&landing), "/teacher");

    dir.router
        .clone()
        .oneshot(post_json("/api/auth/logout", Some(&cookie), json!({})))
        .await
        .unwrap();
    let landing = dir.router.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(common::location(&landing), "/sign-in");
}
