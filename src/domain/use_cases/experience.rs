use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    cache::page_cache::PageCache,
    constants::pages,
    entities::experience::{Experience, ExperienceForm},
    errors::AppError,
    month_year::MonthYear,
    repositories::experience::ExperienceRepository,
    timeline::{build_timeline, timeline_order, TimelineEntry},
};

pub struct ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
    cache: Arc<PageCache>,
}

impl<R> ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R, cache: Arc<PageCache>) -> Self {
        ExperienceHandler { experience_repo, cache }
    }

    fn invalidate_pages(&self) {
        self.cache.invalidate(&[pages::PUBLIC, pages::EXPERIENCE_CARDS, pages::ADMIN_EXPERIENCES]);
    }

    /// Lists experiences in timeline order
    pub async fn list_experiences(&self) -> Result<Vec<Experience>, AppError> {
        let mut experiences = self.experience_repo.list_experiences().await?;
        experiences.sort_by(timeline_order);
        Ok(experiences)
    }

    pub async fn get_experience(&self, id: Uuid) -> Result<Experience, AppError> {
        self.experience_repo.get_experience(id).await
    }

    pub async fn create_experience(&self, form: ExperienceForm) -> Result<Experience, AppError> {
        form.validate()?;

        let insert = form.prepare_for_insert()?;
        let experience = self.experience_repo.create_experience(&insert).await?;

        self.invalidate_pages();
        tracing::info!(id = %experience.id, "Experience created");
        Ok(experience)
    }

    pub async fn update_experience(&self, id: Uuid, form: ExperienceForm) -> Result<Experience, AppError> {
        form.validate()?;

        let insert = form.prepare_for_insert()?;
        let experience = self.experience_repo.update_experience(id, &insert).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Experience updated");
        Ok(experience)
    }

    pub async fn delete_experience(&self, id: Uuid) -> Result<(), AppError> {
        self.experience_repo.delete_experience(id).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Experience deleted");
        Ok(())
    }

    /// Timeline cards with period and duration labels as of `today`
    pub async fn timeline(&self, today: MonthYear) -> Result<Vec<TimelineEntry>, AppError> {
        let experiences = self.experience_repo.list_experiences().await?;
        Ok(build_timeline(&experiences, today))
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.experience_repo.count_experiences().await
    }
}
