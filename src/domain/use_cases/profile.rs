use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    cache::page_cache::PageCache,
    constants::pages,
    entities::profile::{Profile, ProfileForm, ProfileResponse},
    errors::AppError,
    repositories::profile::ProfileRepository,
};

pub struct ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub profile_repo: R,
    cache: Arc<PageCache>,
}

impl<R> ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_repo: R, cache: Arc<PageCache>) -> Self {
        ProfileHandler { profile_repo, cache }
    }

    /// The stored profile, or `None` while it has never been filled in
    pub async fn find_profile(&self) -> Result<Option<Profile>, AppError> {
        self.profile_repo.get_profile().await
    }

    /// The profile with its derived fields as of `today`
    pub async fn get_profile(&self, today: NaiveDate) -> Result<ProfileResponse, AppError> {
        let profile = self
            .find_profile()
            .await?
            .ok_or_else(|| AppError::NotFound("Profile has not been created yet".into()))?;

        Ok(ProfileResponse::from_profile(profile, today))
    }

    /// Inserts or replaces the singleton profile. Nothing is written when validation fails.
    pub async fn upsert_profile(&self, form: ProfileForm) -> Result<Profile, AppError> {
        form.validate()?;

        let upsert = form.prepare_for_upsert();
        let profile = self.profile_repo.upsert_profile(&upsert).await?;

        self.cache.invalidate(&[pages::PUBLIC, pages::ADMIN_PROFILE]);
        tracing::info!("Profile updated");
        Ok(profile)
    }
}
