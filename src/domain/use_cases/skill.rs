use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    cache::page_cache::PageCache,
    constants::{pages, SKILL_SEARCH_LIMIT},
    entities::skill::{Skill, SkillCategory, SkillForm, SkillInsert, SkillTag, SkillTagRequest},
    errors::AppError,
    repositories::skill::SkillRepository,
};

pub struct SkillHandler<R>
where
    R: SkillRepository,
{
    pub skill_repo: R,
    cache: Arc<PageCache>,
    case_sensitive_search: bool,
}

impl<R> SkillHandler<R>
where
    R: SkillRepository,
{
    pub fn new(skill_repo: R, cache: Arc<PageCache>, case_sensitive_search: bool) -> Self {
        SkillHandler {
            skill_repo,
            cache,
            case_sensitive_search,
        }
    }

    // Course lists embed skill names, so they go stale with the skills page.
    fn invalidate_pages(&self) {
        self.cache.invalidate(&[pages::PUBLIC, pages::ADMIN_SKILLS, pages::ADMIN_COURSES]);
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills().await
    }

    pub async fn list_visible_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_visible_skills().await
    }

    pub async fn get_skill(&self, id: Uuid) -> Result<Skill, AppError> {
        self.skill_repo.get_skill(id).await
    }

    pub async fn create_skill(&self, form: SkillForm) -> Result<Skill, AppError> {
        form.validate()?;

        let skill = self.skill_repo.create_skill(&form.prepare_for_insert()?).await?;

        self.invalidate_pages();
        tracing::info!(id = %skill.id, name = %skill.name, "Skill created");
        Ok(skill)
    }

    pub async fn update_skill(&self, id: Uuid, form: SkillForm) -> Result<Skill, AppError> {
        form.validate()?;

        let skill = self.skill_repo.update_skill(id, &form.prepare_for_insert()?).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Skill updated");
        Ok(skill)
    }

    pub async fn delete_skill(&self, id: Uuid) -> Result<(), AppError> {
        self.skill_repo.delete_skill(id).await?;

        self.invalidate_pages();
        tracing::info!(%id, "Skill deleted");
        Ok(())
    }

    /// Autocomplete: up to `SKILL_SEARCH_LIMIT` skills whose name contains the trimmed query.
    pub async fn search_skills(&self, query: &str) -> Result<Vec<SkillTag>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut tags = self
            .skill_repo
            .search_skills(query, self.case_sensitive_search, SKILL_SEARCH_LIMIT)
            .await?;
        tags.truncate(SKILL_SEARCH_LIMIT as usize);
        Ok(tags)
    }

    /// Returns the skill named `request.name` (ignoring case), creating it when absent.
    /// The flag is true when this call created it.
    pub async fn ensure_skill(&self, request: SkillTagRequest) -> Result<(Skill, bool), AppError> {
        request.validate()?;
        let name = request.name.trim();

        if let Some(existing) = self.skill_repo.find_skill_by_name(name).await? {
            return Ok((existing, false));
        }

        let insert = SkillInsert {
            name: name.to_string(),
            description: None,
            category: SkillCategory::Other,
            is_visible: true,
        };

        match self.skill_repo.create_skill(&insert).await {
            Ok(skill) => {
                self.invalidate_pages();
                tracing::info!(id = %skill.id, name = %skill.name, "Skill created from tag input");
                Ok((skill, true))
            }
            Err(AppError::Conflict(_)) => {
                // Lost a race with a concurrent insert of the same name.
                let winner = self
                    .skill_repo
                    .find_skill_by_name(name)
                    .await?
                    .ok_or_else(|| AppError::InternalError(format!("skill {name:?} vanished after conflict")))?;
                Ok((winner, false))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.skill_repo.count_skills().await
    }
}
