use anyhow::anyhow;
use schooldesk_core::AppError;
use schooldesk_models::{Class, ClassId};
use sqlx::PgPool;
use tracing::instrument;

use super::scope::ClassScope;

const CLASS_COLUMNS: &str = "c.id, c.name, c.capacity, c.grade_id, c.supervisor_id, c.created_at";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn list_classes(db: &PgPool, scope: ClassScope) -> Result<Vec<Class>, AppError> {
        let mut query = format!("SELECT {CLASS_COLUMNS} FROM classes c");
        if let Some(condition) = scope.condition(1) {
            query.push_str(" WHERE ");
            query.push_str(&condition);
        }
        query.push_str(" ORDER BY c.name");

        let mut sql = sqlx::query_as::<_, Class>(&query);
        if let Some(caller) = scope.subject() {
            sql = sql.bind(caller);
        }
        let classes = sql.fetch_all(db).await?;

        Ok(classes)
    }

    /// A class outside the caller's scope is reported as missing.
    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: ClassId, scope: ClassScope) -> Result<Class, AppError> {
        let mut query = format!("SELECT {CLASS_COLUMNS} FROM classes c WHERE c.id = $1");
        if let Some(condition) = scope.condition(2) {
            query.push_str(" AND ");
            query.push_str(&condition);
        }

        let mut sql = sqlx::query_as::<_, Class>(&query).bind(id);
        if let Some(caller) = scope.subject() {
            sql = sql.bind(caller);
        }

        sql.fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))
    }
}
