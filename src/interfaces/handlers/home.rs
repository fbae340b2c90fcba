use actix_web::{web, Responder};
use chrono::Local;
use tracing::instrument;

use crate::{
    constants::pages,
    errors::AppError,
    use_cases::portfolio::{PortfolioPage, PortfolioSnapshot},
    AppState,
};

async fn load_snapshot(state: &AppState) -> Result<PortfolioSnapshot, AppError> {
    Ok(PortfolioSnapshot {
        profile: state.profile_handler.find_profile().await?,
        experiences: state.experience_handler.list_experiences().await?,
        educations: state.education_handler.list_educations().await?,
        courses: state.course_handler.list_courses().await?,
        skills: state.skill_handler.list_visible_skills().await?,
        languages: state.language_handler.list_languages().await?,
    })
}

/// The public portfolio page.
#[instrument(skip(state))]
pub async fn portfolio(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::PUBLIC, || async {
            let snapshot = load_snapshot(&state).await?;
            Ok(PortfolioPage::assemble(snapshot, Local::now().date_naive()))
        })
        .await?;

    Ok(page.into_response())
}
