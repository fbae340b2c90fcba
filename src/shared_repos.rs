use crate::repositories::sqlx_repo::{
    SqlxCourseRepo, SqlxEducationRepo, SqlxExperienceRepo, SqlxLanguageRepo, SqlxProfileRepo,
    SqlxSkillRepo, SqlxUserRepo,
};


#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: SqlxUserRepo,
    pub profile_repo: SqlxProfileRepo,
    pub experience_repo: SqlxExperienceRepo,
    pub education_repo: SqlxEducationRepo,
    pub course_repo: SqlxCourseRepo,
    pub skill_repo: SqlxSkillRepo,
    pub language_repo: SqlxLanguageRepo,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            user_repo: SqlxUserRepo::new(pool.clone()),
            profile_repo: SqlxProfileRepo::new(pool.clone()),
            experience_repo: SqlxExperienceRepo::new(pool.clone()),
            education_repo: SqlxEducationRepo::new(pool.clone()),
            course_repo: SqlxCourseRepo::new(pool.clone()),
            skill_repo: SqlxSkillRepo::new(pool.clone()),
            language_repo: SqlxLanguageRepo::new(pool),
        }
    }
}
