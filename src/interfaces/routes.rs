use actix_web::web;

use crate::handlers::json_error::not_found;

mod public;
mod auth;
mod admin;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes)
        .configure(public::config_routes)
        .configure(auth::config_routes)
        .configure(admin::config_routes)
        .default_service(web::route().to(not_found));
}
