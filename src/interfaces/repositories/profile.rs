use async_trait::async_trait;

use crate::{
    constants::PROFILE_ID,
    entities::profile::{Profile, ProfileUpsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Retrieves the singleton profile, if it has been filled in
    async fn get_profile(&self) -> Result<Option<Profile>, AppError>;

    /// Inserts or replaces the singleton profile
    async fn upsert_profile(&self, profile: &ProfileUpsert) -> Result<Profile, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn get_profile(&self) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profile WHERE id = $1")
            .bind(PROFILE_ID)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn upsert_profile(&self, profile: &ProfileUpsert) -> Result<Profile, AppError> {
        let saved = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profile (
                id, full_name, title, email, phone, location,
                website_url, linkedin_url, github_url, birthdate, summary, objectives
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                title = EXCLUDED.title,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                website_url = EXCLUDED.website_url,
                linkedin_url = EXCLUDED.linkedin_url,
                github_url = EXCLUDED.github_url,
                birthdate = EXCLUDED.birthdate,
                summary = EXCLUDED.summary,
                objectives = EXCLUDED.objectives,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(PROFILE_ID)
        .bind(&profile.full_name)
        .bind(&profile.title)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.location)
        .bind(&profile.website_url)
        .bind(&profile.linkedin_url)
        .bind(&profile.github_url)
        .bind(profile.birthdate)
        .bind(&profile.summary)
        .bind(&profile.objectives)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
