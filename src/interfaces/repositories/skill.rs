use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::skill::{Skill, SkillInsert, SkillTag},
    errors::AppError,
    repositories::sqlx_repo::{escape_like, SqlxSkillRepo},
};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    /// Lists all skills by category, then name
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;

    async fn list_visible_skills(&self) -> Result<Vec<Skill>, AppError>;

    async fn get_skill(&self, id: Uuid) -> Result<Skill, AppError>;

    /// Looks a skill up by name, ignoring case
    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError>;

    /// Skills whose name contains `query`, ordered by name
    async fn search_skills(&self, query: &str, case_sensitive: bool, limit: i64) -> Result<Vec<SkillTag>, AppError>;

    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError>;
    async fn update_skill(&self, id: Uuid, skill: &SkillInsert) -> Result<Skill, AppError>;
    async fn delete_skill(&self, id: Uuid) -> Result<(), AppError>;
    async fn count_skills(&self) -> Result<i64, AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

fn name_conflict(e: sqlx::Error) -> AppError {
    match AppError::from(e) {
        AppError::Conflict(_) => AppError::Conflict("A skill with this name already exists".to_string()),
        other => other,
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT * FROM skills ORDER BY category, lower(name)",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn list_visible_skills(&self) -> Result<Vec<Skill>, AppError> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT * FROM skills WHERE is_visible ORDER BY category, lower(name)",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(skills)
    }

    async fn get_skill(&self, id: Uuid) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn find_skill_by_name(&self, name: &str) -> Result<Option<Skill>, AppError> {
        let skill = sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE lower(name) = lower($1)")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(skill)
    }

    async fn search_skills(&self, query: &str, case_sensitive: bool, limit: i64) -> Result<Vec<SkillTag>, AppError> {
        let sql = if case_sensitive {
            "SELECT id, name FROM skills WHERE name LIKE $1 ESCAPE '\\' ORDER BY name LIMIT $2"
        } else {
            "SELECT id, name FROM skills WHERE name ILIKE $1 ESCAPE '\\' ORDER BY name LIMIT $2"
        };

        let pattern = format!("%{}%", escape_like(query));
        let tags = sqlx::query_as::<_, SkillTag>(sql)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(tags)
    }

    async fn create_skill(&self, skill: &SkillInsert) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (name, description, category, is_visible)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&skill.name)
        .bind(&skill.description)
        .bind(skill.category)
        .bind(skill.is_visible)
        .fetch_one(&self.pool)
        .await
        .map_err(name_conflict)
    }

    async fn update_skill(&self, id: Uuid, skill: &SkillInsert) -> Result<Skill, AppError> {
        sqlx::query_as::<_, Skill>(
            r#"
            UPDATE skills
            SET
                name = $2,
                description = $3,
                category = $4,
                is_visible = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&skill.name)
        .bind(&skill.description)
        .bind(skill.category)
        .bind(skill.is_visible)
        .fetch_optional(&self.pool)
        .await
        .map_err(name_conflict)?
        .ok_or_else(|| AppError::NotFound("Skill not found".into()))
    }

    async fn delete_skill(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Skill not found".into()));
        }

        Ok(())
    }

    async fn count_skills(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM skills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
