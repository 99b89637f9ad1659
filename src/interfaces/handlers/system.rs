use actix_web::{get, web, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: &'static str,
    version: &'static str,
    model: String,
    credential_configured: bool,
    uptime: String,
    started_at: String,
    timestamp: String,
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();
    let uptime = now.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "OK",
        version: env!("CARGO_PKG_VERSION"),
        model: state.model.clone(),
        credential_configured: state.edit_handler.is_configured(),
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
        started_at: START_TIME.to_rfc3339_opts(SecondsFormat::Secs, true),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
