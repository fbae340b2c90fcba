use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;

use crate::{constants::START_TIME, repositories::user::UserRepository, AppState};

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime: String,
    pub start_at: String,
    pub timestamp: String,
    pub database: &'static str,
    pub cached_pages: usize,
}

async fn build_health_response(state: &AppState) -> HealthCheckResponse {
    let now_utc = chrono::Utc::now();
    let uptime_duration = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime_duration.num_seconds().max(0) as u64));

    let database = match state.auth_handler.user_repo.check_connection().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "Unavailable"
        }
    };

    HealthCheckResponse {
        status: if database == "OK" { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: human_uptime.to_string(),
        start_at: START_TIME.to_rfc3339(),
        timestamp: now_utc.to_rfc3339(),
        database,
        cached_pages: state.page_cache.len(),
    }
}

#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let response = build_health_response(&state).await;

    if response.database == "OK" {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
