use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::settings::AppConfig;

/// CORS policy for the browser front end. `*` allows any origin.
pub fn cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();

    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
