use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    cache::page_cache::PageCache,
    constants::pages,
    entities::education::{Education, EducationForm},
    errors::AppError,
    repositories::education::EducationRepository,
};

pub struct EducationHandler<R>
where
    R: EducationRepository,
{
    pub education_repo: R,
    cache: Arc<PageCache>,
}

impl<R> EducationHandler<R>
where
    R: EducationRepository,
{
    pub fn new(education_repo: R, cache: Arc<PageCache>) -> Self {
        EducationHandler { education_repo, cache }
    }

    fn invalidate_pages(&self) {
        self.cache.invalidate(&[pages::PUBLIC, pages::ADMIN_EDUCATIONS]);
    }

    /// Most recent start first
    pub async fn list_educations(&self) -> Result<Vec<Education>, AppError> {
        let mut educations = self.education_repo.list_educations().await?;
        educations.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(educations)
    }

    pub async fn get_education(&self, id: Uuid) -> Result<Education, AppError> {
        self.education_repo.get_education(id).await
    }

    pub async fn create_education(&self, form: EducationForm) -> Result<Education, AppError> {
        form.validate()?;

        let insert = form.prepare_for_insert()?;
        let education = self.education_repo.create_education(&insert).await?;

        self.invalidate_pages();
        tracing::info!(id = %education.id, "Education created");
        Ok(education)
    }

    pub async fn update_education(&self, id: Uuid, form: EducationForm) -> Result<Education, AppError> {
        form.validate()?;

        let insert = form.prepare_for_insert()?;
        let education = self.education_repo.update_education(id, &insert).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Education updated");
        Ok(education)
    }

    pub async fn delete_education(&self, id: Uuid) -> Result<(), AppError> {
        self.education_repo.delete_education(id).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Education deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.education_repo.count_educations().await
    }
}
