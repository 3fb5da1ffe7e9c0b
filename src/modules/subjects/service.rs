use anyhow::anyhow;
use schooldesk_core::AppError;
use schooldesk_models::{CreateSubjectDto, Subject};
use sqlx::PgPool;
use tracing::instrument;

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn list_subjects(db: &PgPool) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>("SELECT id, name FROM subjects ORDER BY name")
            .fetch_all(db)
            .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        let name = dto.name.trim();
        if name.is_empty() {
            return Err(AppError::unprocessable(anyhow!(
                "name must be 1-100 characters"
            )));
        }

        let subject = sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow!("A subject with this name already exists"));
            }
            AppError::from(e)
        })?;

        Ok(subject)
    }
}
