mod domain;
mod interfaces;
mod infrastructure;
pub mod client;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod telemetry;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, providers, routes};
pub use infrastructure::{gemini, utils, web};

use gemini::GeminiClient;
use use_cases::edit::EditHandler;

pub struct AppState {
    pub edit_handler: AppEditHandler,
    pub model: String,
    pub max_upload_bytes: usize,
}

pub type AppEditHandler = EditHandler<GeminiClient>;

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Self {
        let model = GeminiClient::new(config);
        let edit_handler = EditHandler::new(model, config.api_key());

        if !edit_handler.is_configured() {
            tracing::warn!("API key is not configured; every proxy request will be rejected");
        }

        AppState {
            edit_handler,
            model: config.model.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}
