use schooldesk_models::{ClassId, GradeId, UserId, UserType};

pub struct UserSeed {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_id: Option<ClassId>,
    pub parent_id: Option<UserId>,
}

pub struct ClassSeed {
    pub id: ClassId,
    pub name: String,
    pub capacity: i32,
    pub grade_id: GradeId,
    pub supervisor_id: Option<UserId>,
}

pub struct MessageSeed {
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    /// Grade levels 1..=grades. Capped at 12.
    pub grades: usize,
    pub classes_per_grade: usize,
    pub teachers: usize,
    pub students_per_class: usize,
    pub messages_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            grades: 6,
            classes_per_grade: 2,
            teachers: 10,
            students_per_class: 20,
            messages_per_student: 2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub grades: usize,
    pub subjects: usize,
    pub classes: usize,
    pub teachers: usize,
    pub parents: usize,
    pub students: usize,
    pub messages: usize,
}
