use actix_web::web;

use crate::handlers::{courses, dashboard, educations, experiences, languages, profile, skills};

/// Registers list/create, edit/update/delete and the HTML-form delete fallback for one entity.
macro_rules! entity_routes {
    ($cfg:expr, $path:literal, $list:path, $create:path, $get:path, $update:path, $delete:path, $delete_form:path) => {
        $cfg.service(
            web::resource($path)
                .route(web::get().to($list))
                .route(web::post().to($create))
        )
        .service(
            web::resource(concat!($path, "/{id}"))
                .route(web::get().to($get))
                .route(web::put().to($update))
                .route(web::post().to($update))
                .route(web::delete().to($delete))
        )
        .route(concat!($path, "/{id}/delete"), web::post().to($delete_form))
    };
}

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("", web::get().to(dashboard::admin_dashboard))
            .service(
                web::resource("/profile")
                    .route(web::get().to(profile::get_profile))
                    .route(web::put().to(profile::upsert_profile))
                    .route(web::post().to(profile::upsert_profile))
            )
            .service(
                web::resource("/api/skills")
                    .route(web::get().to(skills::search_skills))
                    .route(web::post().to(skills::ensure_skill))
            )
            .configure(entity_scopes)
    );
}

fn entity_scopes(cfg: &mut web::ServiceConfig) {
    entity_routes!(
        cfg, "/experiences",
        experiences::list_experiences, experiences::create_experience,
        experiences::get_experience, experiences::update_experience,
        experiences::delete_experience, experiences::delete_experience_form
    );
    entity_routes!(
        cfg, "/educations",
        educations::list_educations, educations::create_education,
        educations::get_education, educations::update_education,
        educations::delete_education, educations::delete_education_form
    );
    entity_routes!(
        cfg, "/courses",
        courses::list_courses, courses::create_course,
        courses::get_course, courses::update_course,
        courses::delete_course, courses::delete_course_form
    );
    entity_routes!(
        cfg, "/skills",
        skills::list_skills, skills::create_skill,
        skills::get_skill, skills::update_skill,
        skills::delete_skill, skills::delete_skill_form
    );
    entity_routes!(
        cfg, "/languages",
        languages::list_languages, languages::create_language,
        languages::get_language, languages::update_language,
        languages::delete_language, languages::delete_language_form
    );
}
