use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::pages,
    entities::education::EducationForm,
    errors::AppError,
    handlers::submission::{self, ReplyWith, Submission},
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_educations(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::ADMIN_EDUCATIONS, || state.education_handler.list_educations())
        .await?;

    Ok(page.into_response())
}

#[instrument(skip(_claims, state))]
pub async fn get_education(
    _claims: AdminClaims,
    education_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&education_id)?;
    let education = state.education_handler.get_education(id).await?;
    Ok(HttpResponse::Ok().json(education))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_education(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: Submission<EducationForm>,
) -> Result<impl Responder, AppError> {
    let (form, reply) = submission::unpack(data);
    let education = state.education_handler.create_education(form).await?;
    Ok(submission::created(reply, &education, pages::ADMIN_EDUCATIONS))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_education(
    _claims: AdminClaims,
    education_id: web::Path<String>,
    state: web::Data<AppState>,
    data: Submission<EducationForm>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&education_id)?;
    let (form, reply) = submission::unpack(data);
    let education = state.education_handler.update_education(id, form).await?;
    Ok(submission::updated(reply, &education, pages::ADMIN_EDUCATIONS))
}

#[instrument(skip(_claims, state))]
pub async fn delete_education(
    _claims: AdminClaims,
    education_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&education_id)?;
    state.education_handler.delete_education(id).await?;
    Ok(submission::deleted(ReplyWith::Json, pages::ADMIN_EDUCATIONS))
}

#[instrument(skip(_claims, state))]
pub async fn delete_education_form(
    _claims: AdminClaims,
    education_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&education_id)?;
    state.education_handler.delete_education(id).await?;
    Ok(submission::deleted(ReplyWith::Redirect, pages::ADMIN_EDUCATIONS))
}
