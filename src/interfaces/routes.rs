use actix_web::web;

use crate::handlers::home::home;

mod proxy;
mod system;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(proxy::config_routes)
            .configure(system::config_routes)
    );
}
