use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse, Responder};

use crate::{
    entities::envelope::ApiEnvelope,
    utils::form::FormData,
    AppState,
};

/// Runs one photo edit. The credential is checked before the body is read,
/// so a misconfigured server answers without touching the upload.
#[post("/proxy")]
pub async fn proxy(
    state: web::Data<AppState>,
    payload: Multipart,
) -> impl Responder {
    if let Err(e) = state.edit_handler.ensure_configured() {
        tracing::error!("Rejecting proxy request: API key is not configured");
        return e.to_http_response();
    }

    let outcome = match FormData::read(payload, state.max_upload_bytes).await {
        Ok(form) => state.edit_handler.process_form(form).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(image_url) => HttpResponse::Ok().json(ApiEnvelope::success(image_url)),
        Err(e) => {
            tracing::error!(error = %e, "Proxy request failed");
            e.to_http_response()
        }
    }
}
