use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::language::{Language, LanguageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxLanguageRepo,
};

#[async_trait]
pub trait LanguageRepository: Send + Sync {
    async fn list_languages(&self) -> Result<Vec<Language>, AppError>;
    async fn get_language(&self, id: Uuid) -> Result<Language, AppError>;
    async fn create_language(&self, language: &LanguageInsert) -> Result<Language, AppError>;
    async fn update_language(&self, id: Uuid, language: &LanguageInsert) -> Result<Language, AppError>;
    async fn delete_language(&self, id: Uuid) -> Result<(), AppError>;
    async fn count_languages(&self) -> Result<i64, AppError>;
}

impl SqlxLanguageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxLanguageRepo { pool }
    }
}

fn name_conflict(e: sqlx::Error) -> AppError {
    match AppError::from(e) {
        AppError::Conflict(_) => AppError::Conflict("This language is already listed".to_string()),
        other => other,
    }
}

#[async_trait]
impl LanguageRepository for SqlxLanguageRepo {
    async fn list_languages(&self) -> Result<Vec<Language>, AppError> {
        let languages = sqlx::query_as::<_, Language>(
            "SELECT * FROM languages ORDER BY proficiency DESC, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(languages)
    }

    async fn get_language(&self, id: Uuid) -> Result<Language, AppError> {
        sqlx::query_as::<_, Language>("SELECT * FROM languages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Language not found".into()))
    }

    async fn create_language(&self, language: &LanguageInsert) -> Result<Language, AppError> {
        sqlx::query_as::<_, Language>(
            "INSERT INTO languages (name, proficiency) VALUES ($1, $2) RETURNING *",
        )
        .bind(&language.name)
        .bind(language.proficiency)
        .fetch_one(&self.pool)
        .await
        .map_err(name_conflict)
    }

    async fn update_language(&self, id: Uuid, language: &LanguageInsert) -> Result<Language, AppError> {
        sqlx::query_as::<_, Language>(
            r#"
            UPDATE languages
            SET name = $2, proficiency = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&language.name)
        .bind(language.proficiency)
        .fetch_optional(&self.pool)
        .await
        .map_err(name_conflict)?
        .ok_or_else(|| AppError::NotFound("Language not found".into()))
    }

    async fn delete_language(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Language not found".into()));
        }

        Ok(())
    }

    async fn count_languages(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
