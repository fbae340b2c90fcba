use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use tracing::instrument;

use crate::{errors::AppError, use_cases::extractors::AdminClaims, AppState};

#[derive(Debug, Serialize)]
pub struct EntityCounts {
    pub experiences: i64,
    pub educations: i64,
    pub courses: i64,
    pub skills: i64,
    pub languages: i64,
}

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub username: String,
    pub has_profile: bool,
    pub counts: EntityCounts,
    pub cached_pages: usize,
}

#[instrument(skip(claims, state))]
pub async fn admin_dashboard(
    claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let counts = EntityCounts {
        experiences: state.experience_handler.count().await?,
        educations: state.education_handler.count().await?,
        courses: state.course_handler.count().await?,
        skills: state.skill_handler.count().await?,
        languages: state.language_handler.count().await?,
    };

    Ok(HttpResponse::Ok().json(Dashboard {
        username: claims.0.username,
        has_profile: state.profile_handler.find_profile().await?.is_some(),
        counts,
        cached_pages: state.page_cache.len(),
    }))
}
