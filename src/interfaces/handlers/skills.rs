use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::pages,
    entities::skill::{SkillForm, SkillSearchQuery, SkillTag, SkillTagRequest},
    errors::AppError,
    handlers::submission::{self, ReplyWith, Submission},
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_skills(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::ADMIN_SKILLS, || state.skill_handler.list_skills())
        .await?;

    Ok(page.into_response())
}

#[instrument(skip(_claims, state))]
pub async fn get_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&skill_id)?;
    let skill = state.skill_handler.get_skill(id).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_skill(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: Submission<SkillForm>,
) -> Result<impl Responder, AppError> {
    let (form, reply) = submission::unpack(data);
    let skill = state.skill_handler.create_skill(form).await?;
    Ok(submission::created(reply, &skill, pages::ADMIN_SKILLS))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
    data: Submission<SkillForm>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&skill_id)?;
    let (form, reply) = submission::unpack(data);
    let skill = state.skill_handler.update_skill(id, form).await?;
    Ok(submission::updated(reply, &skill, pages::ADMIN_SKILLS))
}

#[instrument(skip(_claims, state))]
pub async fn delete_skill(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&skill_id)?;
    state.skill_handler.delete_skill(id).await?;
    Ok(submission::deleted(ReplyWith::Json, pages::ADMIN_SKILLS))
}

#[instrument(skip(_claims, state))]
pub async fn delete_skill_form(
    _claims: AdminClaims,
    skill_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&skill_id)?;
    state.skill_handler.delete_skill(id).await?;
    Ok(submission::deleted(ReplyWith::Redirect, pages::ADMIN_SKILLS))
}

/// Autocomplete for the course skill-tag input.
#[instrument(skip(_claims, state))]
pub async fn search_skills(
    _claims: AdminClaims,
    query: web::Query<SkillSearchQuery>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let tags = state.skill_handler.search_skills(&query.q).await?;
    Ok(HttpResponse::Ok().json(tags))
}

/// Creates the tag if no skill has that name yet: 201 when created, 200 with the existing skill otherwise.
#[instrument(skip(_claims, state, data))]
pub async fn ensure_skill(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: Submission<SkillTagRequest>,
) -> Result<impl Responder, AppError> {
    let (request, _) = submission::unpack(data);
    let (skill, created) = state.skill_handler.ensure_skill(request).await?;
    let tag = SkillTag::from(&skill);

    Ok(if created {
        HttpResponse::Created().json(tag)
    } else {
        HttpResponse::Ok().json(tag)
    })
}
