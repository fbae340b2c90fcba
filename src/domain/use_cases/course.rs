use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    cache::page_cache::PageCache,
    constants::pages,
    entities::course::{Course, CourseForm},
    errors::AppError,
    repositories::course::CourseRepository,
};

pub struct CourseHandler<R>
where
    R: CourseRepository,
{
    pub course_repo: R,
    cache: Arc<PageCache>,
}

impl<R> CourseHandler<R>
where
    R: CourseRepository,
{
    pub fn new(course_repo: R, cache: Arc<PageCache>) -> Self {
        CourseHandler { course_repo, cache }
    }

    fn invalidate_pages(&self) {
        self.cache.invalidate(&[pages::PUBLIC, pages::ADMIN_COURSES]);
    }

    /// Most recently completed first, each with its tagged skills
    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        self.course_repo.list_courses().await
    }

    pub async fn get_course(&self, id: Uuid) -> Result<Course, AppError> {
        self.course_repo.get_course(id).await
    }

    pub async fn create_course(&self, form: CourseForm) -> Result<Course, AppError> {
        form.validate()?;

        let insert = form.prepare_for_insert()?;
        let course = self.course_repo.create_course(&insert).await?;

        self.invalidate_pages();
        tracing::info!(id = %course.id, skills = course.skills.len(), "Course created");
        Ok(course)
    }

    /// Updates the course and replaces its whole tag set
    pub async fn update_course(&self, id: Uuid, form: CourseForm) -> Result<Course, AppError> {
        form.validate()?;

        let insert = form.prepare_for_insert()?;
        let course = self.course_repo.update_course(id, &insert).await?;

        self.invalidate_pages();
        tracing::info!(%id, skills = course.skills.len(), "Course updated");
        Ok(course)
    }

    pub async fn delete_course(&self, id: Uuid) -> Result<(), AppError> {
        self.course_repo.delete_course(id).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Course deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.course_repo.count_courses().await
    }
}
