use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::pages,
    entities::experience::ExperienceForm,
    errors::AppError,
    handlers::submission::{self, ReplyWith, Submission},
    month_year::MonthYear,
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

/// Legacy JSON feed of experience cards.
#[instrument(skip(state))]
pub async fn experience_cards(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::EXPERIENCE_CARDS, || state.experience_handler.timeline(MonthYear::today()))
        .await?;

    Ok(page.into_response())
}

#[instrument(skip(_claims, state))]
pub async fn list_experiences(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::ADMIN_EXPERIENCES, || state.experience_handler.list_experiences())
        .await?;

    Ok(page.into_response())
}

#[instrument(skip(_claims, state))]
pub async fn get_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&experience_id)?;
    let experience = state.experience_handler.get_experience(id).await?;
    Ok(HttpResponse::Ok().json(experience))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_experience(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: Submission<ExperienceForm>,
) -> Result<impl Responder, AppError> {
    let (form, reply) = submission::unpack(data);
    let experience = state.experience_handler.create_experience(form).await?;
    Ok(submission::created(reply, &experience, pages::ADMIN_EXPERIENCES))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
    data: Submission<ExperienceForm>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&experience_id)?;
    let (form, reply) = submission::unpack(data);
    let experience = state.experience_handler.update_experience(id, form).await?;
    Ok(submission::updated(reply, &experience, pages::ADMIN_EXPERIENCES))
}

#[instrument(skip(_claims, state))]
pub async fn delete_experience(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&experience_id)?;
    state.experience_handler.delete_experience(id).await?;
    Ok(submission::deleted(ReplyWith::Json, pages::ADMIN_EXPERIENCES))
}

#[instrument(skip(_claims, state))]
pub async fn delete_experience_form(
    _claims: AdminClaims,
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&experience_id)?;
    state.experience_handler.delete_experience(id).await?;
    Ok(submission::deleted(ReplyWith::Redirect, pages::ADMIN_EXPERIENCES))
}
