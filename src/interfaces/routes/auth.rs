use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::get().to(auth::login_page))
            .route(web::post().to(auth::login))
    )
    .route("/logout", web::post().to(auth::logout));
}
