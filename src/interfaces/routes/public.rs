use actix_web::web;

use crate::handlers::{experiences, home, system};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::portfolio))
        .route("/health", web::get().to(system::health_check))
        .route("/api/v1/experiences", web::get().to(experiences::experience_cards));
}
