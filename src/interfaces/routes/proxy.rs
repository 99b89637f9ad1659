use actix_web::web;

use crate::handlers::proxy;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(proxy::proxy);
}
