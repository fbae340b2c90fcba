use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    cache::page_cache::PageCache,
    constants::pages,
    entities::language::{sort_languages, Language, LanguageForm},
    errors::AppError,
    repositories::language::LanguageRepository,
};

pub struct LanguageHandler<R>
where
    R: LanguageRepository,
{
    pub language_repo: R,
    cache: Arc<PageCache>,
}

impl<R> LanguageHandler<R>
where
    R: LanguageRepository,
{
    pub fn new(language_repo: R, cache: Arc<PageCache>) -> Self {
        LanguageHandler { language_repo, cache }
    }

    fn invalidate_pages(&self) {
        self.cache.invalidate(&[pages::PUBLIC, pages::ADMIN_LANGUAGES]);
    }

    pub async fn list_languages(&self) -> Result<Vec<Language>, AppError> {
        let mut languages = self.language_repo.list_languages().await?;
        sort_languages(&mut languages);
        Ok(languages)
    }

    pub async fn get_language(&self, id: Uuid) -> Result<Language, AppError> {
        self.language_repo.get_language(id).await
    }

    pub async fn create_language(&self, form: LanguageForm) -> Result<Language, AppError> {
        form.validate()?;

        let language = self.language_repo.create_language(&form.prepare_for_insert()?).await?;

        self.invalidate_pages();
        tracing::info!(id = %language.id, "Language created");
        Ok(language)
    }

    pub async fn update_language(&self, id: Uuid, form: LanguageForm) -> Result<Language, AppError> {
        form.validate()?;

        let language = self.language_repo.update_language(id, &form.prepare_for_insert()?).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Language updated");
        Ok(language)
    }

    pub async fn delete_language(&self, id: Uuid) -> Result<(), AppError> {
        self.language_repo.delete_language(id).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Language deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.language_repo.count_languages().await
    }
}
