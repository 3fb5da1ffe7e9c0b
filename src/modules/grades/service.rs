use schooldesk_core::AppError;
use schooldesk_models::Grade;
use sqlx::PgPool;
use tracing::instrument;

pub struct GradeService;

impl GradeService {
    #[instrument(skip(db))]
    pub async fn list_grades(db: &PgPool) -> Result<Vec<Grade>, AppError> {
        let grades = sqlx::query_as::<_, Grade>("SELECT id, level FROM grades ORDER BY level")
            .fetch_all(db)
            .await?;

        Ok(grades)
    }
}
