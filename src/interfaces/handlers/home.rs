use actix_web::{get, web, HttpResponse, Responder};

use crate::{constants::PROXY_PATH, AppState};

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "AI photo edit proxy",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.model,
        "endpoint": PROXY_PATH
    }))
}
