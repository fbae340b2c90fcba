use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::pages,
    entities::language::LanguageForm,
    errors::AppError,
    handlers::submission::{self, ReplyWith, Submission},
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_languages(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::ADMIN_LANGUAGES, || state.language_handler.list_languages())
        .await?;

    Ok(page.into_response())
}

#[instrument(skip(_claims, state))]
pub async fn get_language(
    _claims: AdminClaims,
    language_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&language_id)?;
    let language = state.language_handler.get_language(id).await?;
    Ok(HttpResponse::Ok().json(language))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_language(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: Submission<LanguageForm>,
) -> Result<impl Responder, AppError> {
    let (form, reply) = submission::unpack(data);
    let language = state.language_handler.create_language(form).await?;
    Ok(submission::created(reply, &language, pages::ADMIN_LANGUAGES))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_language(
    _claims: AdminClaims,
    language_id: web::Path<String>,
    state: web::Data<AppState>,
    data: Submission<LanguageForm>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&language_id)?;
    let (form, reply) = submission::unpack(data);
    let language = state.language_handler.update_language(id, form).await?;
    Ok(submission::updated(reply, &language, pages::ADMIN_LANGUAGES))
}

#[instrument(skip(_claims, state))]
pub async fn delete_language(
    _claims: AdminClaims,
    language_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&language_id)?;
    state.language_handler.delete_language(id).await?;
    Ok(submission::deleted(ReplyWith::Json, pages::ADMIN_LANGUAGES))
}

#[instrument(skip(_claims, state))]
pub async fn delete_language_form(
    _claims: AdminClaims,
    language_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&language_id)?;
    state.language_handler.delete_language(id).await?;
    Ok(submission::deleted(ReplyWith::Redirect, pages::ADMIN_LANGUAGES))
}
