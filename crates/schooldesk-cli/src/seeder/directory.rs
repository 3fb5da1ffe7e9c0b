//! Grades, classes and subjects.

use rayon::prelude::*;
use schooldesk_models::{ClassId, GradeId, UserId};
use sqlx::PgPool;

use super::SeedResult;
use super::models::ClassSeed;

pub const SUBJECTS: [&str; 10] = [
    "Mathematics",
    "English",
    "Biology",
    "Chemistry",
    "Physics",
    "History",
    "Geography",
    "Art",
    "Music",
    "Physical Education",
];

const MAX_GRADE: usize = 12;
const CLASS_CAPACITY: i32 = 30;

/// `class_name(3, 1)` is `"3B"`.
pub fn class_name(level: usize, section: usize) -> String {
    let letter = (b'A' + (section % 26) as u8) as char;
    format!("{level}{letter}")
}

/// `grade_ids[i]` is grade level `i + 1`. Supervisors are assigned round
/// robin; with no teachers, classes are left unsupervised.
pub fn generate_classes(
    grade_ids: &[GradeId],
    classes_per_grade: usize,
    teacher_ids: &[UserId],
) -> Vec<ClassSeed> {
    grade_ids
        .par_iter()
        .enumerate()
        .flat_map(|(grade_idx, &grade_id)| {
            (0..classes_per_grade)
                .map(|section| {
                    let n = grade_idx * classes_per_grade + section;
                    ClassSeed {
                        id: ClassId::new(),
                        name: class_name(grade_idx + 1, section),
                        capacity: CLASS_CAPACITY,
                        grade_id,
                        supervisor_id: (!teacher_ids.is_empty())
                            .then(|| teacher_ids[n % teacher_ids.len()]),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_grades(db: &PgPool, count: usize) -> SeedResult<Vec<GradeId>> {
    let mut ids = Vec::with_capacity(count.min(MAX_GRADE));
    for level in 1..=count.min(MAX_GRADE) as i32 {
        let id = sqlx::query_scalar::<_, GradeId>(
            r#"
            INSERT INTO grades (level) VALUES ($1)
            ON CONFLICT (level) DO UPDATE SET level = EXCLUDED.level
            RETURNING id
            "#,
        )
        .bind(level)
        .fetch_one(db)
        .await?;
        ids.push(id);
    }
    println!("   ✓ Ensured {} grades", ids.len());
    Ok(ids)
}

pub async fn seed_subjects(db: &PgPool) -> SeedResult<usize> {
    let mut inserted = 0;
    for name in SUBJECTS {
        inserted += sqlx::query("INSERT INTO subjects (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(db)
            .await?
            .rows_affected() as usize;
    }
    println!("   ✓ Inserted {inserted} subjects");
    Ok(inserted)
}

pub async fn insert_classes(db: &PgPool, classes: &[ClassSeed]) -> SeedResult<()> {
    let mut tx = db.begin().await?;
    for class in classes {
        sqlx::query(
            r#"
            INSERT INTO classes (id, name, capacity, grade_id, supervisor_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(class.id)
        .bind(&class.name)
        .bind(class.capacity)
        .bind(class.grade_id)
        .bind(class.supervisor_id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
