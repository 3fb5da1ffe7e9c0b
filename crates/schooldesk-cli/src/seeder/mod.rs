//! Fake data for development databases.
//!
//! Seeded accounts use the `seed.` username prefix and share one password,
//! [`SEED_PASSWORD`]. [`clear_seed`] removes exactly those accounts together
//! with the directory rows.

mod directory;
mod messages;
mod models;
mod users;

use schooldesk_core::hash_password_with_cost;
use sqlx::PgPool;
use std::time::Instant;

pub use directory::{SUBJECTS, class_name, generate_classes};
pub use messages::generate_messages;
pub use models::{ClassSeed, MessageSeed, SeedConfig, SeedSummary, UserSeed};
pub use users::{generate_families, generate_teachers};

pub const SEED_PASSWORD: &str = "password123";
pub const SEED_USERNAME_PREFIX: &str = "seed.";

// Seed accounts are throwaway; a low cost keeps hashing out of the way.
const SEED_BCRYPT_COST: u32 = 6;

pub type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> SeedResult<SeedSummary> {
    let start = Instant::now();
    println!("🌱 Seeding database...");

    let password_hash = hash_password_with_cost(SEED_PASSWORD, SEED_BCRYPT_COST)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let grade_ids = directory::seed_grades(db, config.grades).await?;
    let subjects = directory::seed_subjects(db).await?;

    let teachers = generate_teachers(config.teachers, &password_hash);
    users::insert_users_batch(db, &teachers).await?;
    println!("   ✓ Inserted {} teachers", teachers.len());

    let teacher_ids: Vec<_> = teachers.iter().map(|t| t.id).collect();
    let classes = generate_classes(&grade_ids, config.classes_per_grade, &teacher_ids);
    directory::insert_classes(db, &classes).await?;
    println!("   ✓ Inserted {} classes", classes.len());

    let (parents, students) = generate_families(&classes, config.students_per_class, &password_hash);
    users::insert_users_batch(db, &parents).await?;
    users::insert_users_batch(db, &students).await?;
    println!(
        "   ✓ Inserted {} parents and {} students",
        parents.len(),
        students.len()
    );

    let messages = generate_messages(&classes, &students, config.messages_per_student);
    messages::insert_messages_batch(db, &messages).await?;
    println!("   ✓ Inserted {} messages", messages.len());

    let summary = SeedSummary {
        grades: grade_ids.len(),
        subjects,
        classes: classes.len(),
        teachers: teachers.len(),
        parents: parents.len(),
        students: students.len(),
        messages: messages.len(),
    };

    println!("\n✅ Seeding complete in {:?}", start.elapsed());
    println!("   Every seeded account uses the password '{SEED_PASSWORD}'");
    Ok(summary)
}

/// Removes seeded accounts (their messages and sessions cascade) and all
/// classes, subjects and grades.
pub async fn clear_seed(db: &PgPool) -> SeedResult<u64> {
    let mut tx = db.begin().await?;

    let users = sqlx::query("DELETE FROM users WHERE username LIKE $1")
        .bind(format!("{SEED_USERNAME_PREFIX}%"))
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let classes = sqlx::query("DELETE FROM classes")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let subjects = sqlx::query("DELETE FROM subjects")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let grades = sqlx::query("DELETE FROM grades")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!("   ✓ Removed {users} users, {classes} classes, {subjects} subjects, {grades} grades");
    Ok(users + classes + subjects + grades)
}
