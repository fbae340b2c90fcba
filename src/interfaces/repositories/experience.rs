use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::experience::{Experience, ExperienceInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxExperienceRepo,
};

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError>;
    async fn get_experience(&self, id: Uuid) -> Result<Experience, AppError>;
    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<Experience, AppError>;
    async fn update_experience(&self, id: Uuid, experience: &ExperienceInsert) -> Result<Experience, AppError>;
    async fn delete_experience(&self, id: Uuid) -> Result<(), AppError>;
    async fn count_experiences(&self) -> Result<i64, AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        let experiences = sqlx::query_as::<_, Experience>(
            r#"
            SELECT * FROM experiences
            ORDER BY is_current DESC, start_date DESC, end_date DESC NULLS FIRST, company
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }

    async fn get_experience(&self, id: Uuid) -> Result<Experience, AppError> {
        sqlx::query_as::<_, Experience>("SELECT * FROM experiences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Experience not found".into()))
    }

    async fn create_experience(&self, experience: &ExperienceInsert) -> Result<Experience, AppError> {
        let created = sqlx::query_as::<_, Experience>(
            r#"
            INSERT INTO experiences (
                role, company, location, start_date, end_date,
                is_current, description, salary, exit_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&experience.role)
        .bind(&experience.company)
        .bind(&experience.location)
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.is_current)
        .bind(&experience.description)
        .bind(experience.salary)
        .bind(&experience.exit_reason)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_experience(&self, id: Uuid, experience: &ExperienceInsert) -> Result<Experience, AppError> {
        sqlx::query_as::<_, Experience>(
            r#"
            UPDATE experiences
            SET
                role = $2,
                company = $3,
                location = $4,
                start_date = $5,
                end_date = $6,
                is_current = $7,
                description = $8,
                salary = $9,
                exit_reason = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&experience.role)
        .bind(&experience.company)
        .bind(&experience.location)
        .bind(experience.start_date)
        .bind(experience.end_date)
        .bind(experience.is_current)
        .bind(&experience.description)
        .bind(experience.salary)
        .bind(&experience.exit_reason)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Experience not found".into()))
    }

    async fn delete_experience(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Experience not found".into()));
        }

        Ok(())
    }

    async fn count_experiences(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM experiences")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
