use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod shared_repos;

pub use domain::{entities, use_cases, month_year, calendar, timeline, password};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, cache, db, utils};

use auth::jwt::JwtService;
use cache::page_cache::PageCache;
use repositories::sqlx_repo::{
    SqlxCourseRepo, SqlxEducationRepo, SqlxExperienceRepo, SqlxLanguageRepo, SqlxProfileRepo,
    SqlxSkillRepo, SqlxUserRepo,
};
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler, course::CourseHandler, education::EducationHandler,
    experience::ExperienceHandler, language::LanguageHandler, profile::ProfileHandler,
    skill::SkillHandler,
};

pub type AppAuthHandler = AuthHandler<SqlxUserRepo, JwtService>;

pub struct AppState {
    pub config: AppConfig,
    pub auth_handler: AppAuthHandler,
    pub profile_handler: ProfileHandler<SqlxProfileRepo>,
    pub experience_handler: ExperienceHandler<SqlxExperienceRepo>,
    pub education_handler: EducationHandler<SqlxEducationRepo>,
    pub course_handler: CourseHandler<SqlxCourseRepo>,
    pub skill_handler: SkillHandler<SqlxSkillRepo>,
    pub language_handler: LanguageHandler<SqlxLanguageRepo>,
    pub page_cache: Arc<PageCache>,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: sqlx::PgPool) -> Self {
        let repos = SharedRepositories::new(pool);
        let page_cache = Arc::new(PageCache::new(config.page_cache_ttl()));

        AppState {
            config: config.clone(),
            auth_handler: AuthHandler::new(repos.user_repo, JwtService::new(config)),
            profile_handler: ProfileHandler::new(repos.profile_repo, page_cache.clone()),
            experience_handler: ExperienceHandler::new(repos.experience_repo, page_cache.clone()),
            education_handler: EducationHandler::new(repos.education_repo, page_cache.clone()),
            course_handler: CourseHandler::new(repos.course_repo, page_cache.clone()),
            skill_handler: SkillHandler::new(
                repos.skill_repo,
                page_cache.clone(),
                config.skill_search_case_sensitive,
            ),
            language_handler: LanguageHandler::new(repos.language_repo, page_cache.clone()),
            page_cache,
        }
    }
}
