use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    constants::pages,
    entities::course::CourseForm,
    errors::AppError,
    handlers::submission::{self, ReplyWith, Submission},
    use_cases::extractors::AdminClaims,
    utils::valid_uuid::valid_uuid,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn list_courses(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::ADMIN_COURSES, || state.course_handler.list_courses())
        .await?;

    Ok(page.into_response())
}

#[instrument(skip(_claims, state))]
pub async fn get_course(
    _claims: AdminClaims,
    course_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&course_id)?;
    let course = state.course_handler.get_course(id).await?;
    Ok(HttpResponse::Ok().json(course))
}

#[instrument(skip(_claims, state, data))]
pub async fn create_course(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: Submission<CourseForm>,
) -> Result<impl Responder, AppError> {
    let (form, reply) = submission::unpack(data);
    let course = state.course_handler.create_course(form).await?;
    Ok(submission::created(reply, &course, pages::ADMIN_COURSES))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_course(
    _claims: AdminClaims,
    course_id: web::Path<String>,
    state: web::Data<AppState>,
    data: Submission<CourseForm>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&course_id)?;
    let (form, reply) = submission::unpack(data);
    let course = state.course_handler.update_course(id, form).await?;
    Ok(submission::updated(reply, &course, pages::ADMIN_COURSES))
}

#[instrument(skip(_claims, state))]
pub async fn delete_course(
    _claims: AdminClaims,
    course_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&course_id)?;
    state.course_handler.delete_course(id).await?;
    Ok(submission::deleted(ReplyWith::Json, pages::ADMIN_COURSES))
}

#[instrument(skip(_claims, state))]
pub async fn delete_course_form(
    _claims: AdminClaims,
    course_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let id = valid_uuid(&course_id)?;
    state.course_handler.delete_course(id).await?;
    Ok(submission::deleted(ReplyWith::Redirect, pages::ADMIN_COURSES))
}
