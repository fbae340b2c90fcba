use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::education::{Education, EducationInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxEducationRepo,
};

#[async_trait]
pub trait EducationRepository: Send + Sync {
    async fn list_educations(&self) -> Result<Vec<Education>, AppError>;
    async fn get_education(&self, id: Uuid) -> Result<Education, AppError>;
    async fn create_education(&self, education: &EducationInsert) -> Result<Education, AppError>;
    async fn update_education(&self, id: Uuid, education: &EducationInsert) -> Result<Education, AppError>;
    async fn delete_education(&self, id: Uuid) -> Result<(), AppError>;
    async fn count_educations(&self) -> Result<i64, AppError>;
}

impl SqlxEducationRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxEducationRepo { pool }
    }
}

#[async_trait]
impl EducationRepository for SqlxEducationRepo {
    async fn list_educations(&self) -> Result<Vec<Education>, AppError> {
        let educations = sqlx::query_as::<_, Education>(
            "SELECT * FROM educations ORDER BY start_date DESC, institution",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(educations)
    }

    async fn get_education(&self, id: Uuid) -> Result<Education, AppError> {
        sqlx::query_as::<_, Education>("SELECT * FROM educations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Education not found".into()))
    }

    async fn create_education(&self, education: &EducationInsert) -> Result<Education, AppError> {
        let created = sqlx::query_as::<_, Education>(
            r#"
            INSERT INTO educations (
                institution, level, course_name, start_date, end_date, status, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&education.institution)
        .bind(education.level)
        .bind(&education.course_name)
        .bind(education.start_date)
        .bind(education.end_date)
        .bind(education.status)
        .bind(&education.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_education(&self, id: Uuid, education: &EducationInsert) -> Result<Education, AppError> {
        sqlx::query_as::<_, Education>(
            r#"
            UPDATE educations
            SET
                institution = $2,
                level = $3,
                course_name = $4,
                start_date = $5,
                end_date = $6,
                status = $7,
                description = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&education.institution)
        .bind(education.level)
        .bind(&education.course_name)
        .bind(education.start_date)
        .bind(education.end_date)
        .bind(education.status)
        .bind(&education.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Education not found".into()))
    }

    async fn delete_education(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM educations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Education not found".into()));
        }

        Ok(())
    }

    async fn count_educations(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM educations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
