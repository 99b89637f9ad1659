use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    entities::model_content::{GenerateContentRequest, GenerateContentResponse},
    errors::AppError,
    providers::image_model::ImageModel,
    settings::{AppConfig, ApiKey},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// `generateContent` client for the Gemini REST API.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(Client::new(), &config.api_base_url, &config.model)
    }

    pub fn with_client(http: Client, base_url: &str, model: &str) -> Self {
        GeminiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ImageModel for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AppError> {
        let response = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(model = %self.model, "Model request failed: {}", e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model = %self.model, %status, "Model API returned an error");
            return Err(AppError::Upstream(upstream_error_detail(status, &body)));
        }

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            tracing::error!(model = %self.model, "Unreadable model reply: {}", e);
            AppError::Upstream(format!("resposta ilegível do modelo ({})", e))
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// Pulls the provider's `{"error": {...}}` message out of a failed reply.
fn upstream_error_detail(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| match (b.error.status, b.error.message) {
            (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
            (None, Some(message)) => Some(message),
            (Some(code), None) => Some(code),
            (None, None) => None,
        });

    match detail {
        Some(detail) => format!("{} ({})", detail, status.as_u16()),
        None => format!("status {}", status.as_u16()),
    }
}
