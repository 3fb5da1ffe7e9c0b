//! Teachers, parents and students.

use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use schooldesk_models::{UserId, UserType};
use sqlx::{PgPool, Postgres, Transaction};

use super::models::{ClassSeed, UserSeed};
use super::{SEED_USERNAME_PREFIX, SeedResult};

// 9 params per user
const BATCH_SIZE: usize = 500;

pub fn generate_teachers(count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| generate_user(UserType::Teacher, idx, password_hash))
        .collect()
}

/// One parent per student. Students are enrolled in their class and linked
/// to their parent. Returns `(parents, students)`.
pub fn generate_families(
    classes: &[ClassSeed],
    students_per_class: usize,
    password_hash: &str,
) -> (Vec<UserSeed>, Vec<UserSeed>) {
    classes
        .par_iter()
        .enumerate()
        .flat_map(|(class_idx, class)| {
            (0..students_per_class)
                .map(|student_idx| {
                    let idx = class_idx * 1000 + student_idx;
                    let parent = generate_user(UserType::Parent, idx, password_hash);
                    let mut student = generate_user(UserType::Student, idx, password_hash);
                    student.last_name = parent.last_name.clone();
                    student.class_id = Some(class.id);
                    student.parent_id = Some(parent.id);
                    (parent, student)
                })
                .collect::<Vec<_>>()
        })
        .unzip()
}

fn generate_user(user_type: UserType, idx: usize, password_hash: &str) -> UserSeed {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let role = user_type.as_str().to_lowercase();

    UserSeed {
        id: UserId::new(),
        username: format!("{SEED_USERNAME_PREFIX}{role}{idx}"),
        password_hash: password_hash.to_string(),
        user_type,
        email: format!(
            "{}.{}+{}{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            role,
            idx
        ),
        first_name,
        last_name,
        class_id: None,
        parent_id: None,
    }
}

pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> SeedResult<()> {
    let mut tx = db.begin().await?;
    for chunk in users.chunks(BATCH_SIZE) {
        insert_users_chunk(&mut tx, chunk).await?;
    }
    tx.commit().await?;
    Ok(())
}

async fn insert_users_chunk(tx: &mut Transaction<'_, Postgres>, users: &[UserSeed]) -> SeedResult<()> {
    if users.is_empty() {
        return Ok(());
    }

    let mut query = String::from(
        "INSERT INTO users (id, username, password, user_type, first_name, last_name, email, class_id, parent_id) VALUES ",
    );
    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let base = i * 9;
        let params: Vec<String> = (1..=9).map(|n| format!("${}", base + n)).collect();
        query.push_str(&format!("({})", params.join(", ")));
    }

    let mut q = sqlx::query(&query);
    for user in users {
        q = q
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.user_type)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(user.class_id)
            .bind(user.parent_id);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}
