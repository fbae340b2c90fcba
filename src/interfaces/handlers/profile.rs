use actix_web::{web, Responder};
use chrono::Local;
use tracing::instrument;

use crate::{
    constants::pages,
    entities::profile::ProfileForm,
    errors::AppError,
    handlers::submission::{self, Submission},
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state))]
pub async fn get_profile(
    _claims: AdminClaims,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let page = state
        .page_cache
        .get_or_render(pages::ADMIN_PROFILE, || state.profile_handler.get_profile(Local::now().date_naive()))
        .await?;

    Ok(page.into_response())
}

#[instrument(skip(_claims, state, data))]
pub async fn upsert_profile(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: Submission<ProfileForm>,
) -> Result<impl Responder, AppError> {
    let (form, reply) = submission::unpack(data);
    let profile = state.profile_handler.upsert_profile(form).await?;
    Ok(submission::updated(reply, &profile, pages::ADMIN_PROFILE))
}
