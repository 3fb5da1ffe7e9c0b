//! Messages between class supervisors and their students' parents.

use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rayon::prelude::*;
use schooldesk_models::UserId;
use sqlx::PgPool;
use std::collections::HashMap;

use super::SeedResult;
use super::models::{ClassSeed, MessageSeed, UserSeed};

// 5 params per message
const BATCH_SIZE: usize = 1000;

/// Alternates between the supervisor writing to the parent and the parent
/// writing back. Students without a supervised class or a parent get none.
pub fn generate_messages(
    classes: &[ClassSeed],
    students: &[UserSeed],
    per_student: usize,
) -> Vec<MessageSeed> {
    let supervisors: HashMap<_, UserId> = classes
        .iter()
        .filter_map(|c| c.supervisor_id.map(|s| (c.id, s)))
        .collect();

    students
        .par_iter()
        .filter_map(|s| {
            let teacher = *supervisors.get(&s.class_id?)?;
            Some((teacher, s.parent_id?))
        })
        .flat_map(|(teacher, parent)| {
            (0..per_student)
                .map(|n| {
                    let (sender_id, recipient_id) = if n % 2 == 0 {
                        (teacher, parent)
                    } else {
                        (parent, teacher)
                    };
                    MessageSeed {
                        sender_id,
                        recipient_id,
                        subject: Sentence(2..6).fake(),
                        body: Paragraph(1..4).fake(),
                        is_read: Boolean(50).fake(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn insert_messages_batch(db: &PgPool, messages: &[MessageSeed]) -> SeedResult<()> {
    let mut tx = db.begin().await?;

    for chunk in messages.chunks(BATCH_SIZE) {
        let mut query = String::from(
            "INSERT INTO messages (sender_id, recipient_id, subject, body, is_read, read_at) VALUES ",
        );
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 5;
            query.push_str(&format!(
                "(${}, ${}, ${}, ${}, ${}, CASE WHEN ${} THEN NOW() END)",
                p + 1,
                p + 2,
                p + 3,
                p + 4,
                p + 5,
                p + 5
            ));
        }

        let mut q = sqlx::query(&query);
        for message in chunk {
            q = q
                .bind(message.sender_id)
                .bind(message.recipient_id)
                .bind(&message.subject)
                .bind(&message.body)
                .bind(message.is_read);
        }
        q.execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schooldesk_models::{ClassId, GradeId, UserType};

    fn student(class_id: ClassId, parent_id: Option<UserId>) -> UserSeed {
        UserSeed {
            id: UserId::new(),
            username: "seed.student0".to_string(),
            password_hash: "hash".to_string(),
            user_type: UserType::Student,
            first_name: "Sam".to_string(),
            last_name: "Lee".to_string(),
            email: "sam@example.com".to_string(),
            class_id: Some(class_id),
            parent_id,
        }
    }

    #[test]
    fn test_messages_alternate_between_teacher_and_parent() {
        let teacher = UserId::new();
        let parent = UserId::new();
        let class = ClassSeed {
            id: ClassId::new(),
            name: "1A".to_string(),
            capacity: 30,
            grade_id: GradeId::new(),
            supervisor_id: Some(teacher),
        };

        let messages = generate_messages(
            std::slice::from_ref(&class),
            &[student(class.id, Some(parent))],
            3,
        );
        assert_eq!(messages.len(), 3);
        assert_eq!((messages[0].sender_id, messages[0].recipient_id), (teacher, parent));
        assert_eq!((messages[1].sender_id, messages[1].recipient_id), (parent, teacher));
        assert!(messages.iter().all(|m| m.sender_id != m.recipient_id));
        assert!(messages.iter().all(|m| !m.subject.is_empty() && m.subject.len() <= 200));
    }

    #[test]
    fn test_unsupervised_or_orphaned_students_get_no_messages() {
        let class = ClassSeed {
            id: ClassId::new(),
            name: "1A".to_string(),
            capacity: 30,
            grade_id: GradeId::new(),
            supervisor_id: None,
        };
        let messages = generate_messages(
            std::slice::from_ref(&class),
            &[student(class.id, Some(UserId::new())), student(class.id, None)],
            2,
        );
        assert!(messages.is_empty());
    }
}
