use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use once_cell::sync::Lazy;
use retouch_proxy::{
    constants::START_TIME,
    graceful_shutdown::shutdown_signal,
    routes::configure_routes,
    settings::AppConfig,
    telemetry::init_tracing,
    web::cors,
    AppState,
};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let loaded = AppConfig::new();
    init_tracing(loaded.as_ref().is_ok_and(|cfg| cfg.is_production()));
    Lazy::force(&START_TIME);

    let config = match loaded {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = web::Data::new(AppState::new(&config));
    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {} (model: {})",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr,
        config.model
    );

    let cors_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
