//! Client for the `/api/proxy` endpoint.
//!
//! Each helper builds the multipart form for one edit action, posts it once
//! and unwraps the JSON envelope into the resulting image data URL.

use derive_more::Display;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{
    constants::{
        FIELD_ACTION, FIELD_ADJUSTMENT_PROMPT, FIELD_HOTSPOT_X, FIELD_HOTSPOT_Y,
        FIELD_MAIN_IMAGE, FIELD_ORIGINAL_IMAGE, FIELD_SOURCE_IMAGE, FIELD_USER_PROMPT, PROXY_PATH,
    },
    entities::edit_request::{EditAction, Hotspot, ImageUpload},
    utils::inline_data::FALLBACK_MIME_TYPE,
};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ClientError {
    /// Message reported by the proxy.
    #[display("{_0}")]
    Api(String),

    #[display("A solicitação da API falhou com o status {_0}")]
    Status(u16),

    #[display("A resposta do servidor não é um JSON válido.")]
    InvalidJson,

    #[display("A resposta da API não continha uma URL de imagem.")]
    MissingImageUrl,

    #[display("{_0}")]
    Transport(String),
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            ClientError::Transport("Ocorreu um erro desconhecido.".to_string())
        } else {
            ClientError::Transport(message)
        }
    }
}

/// Loose view of the proxy envelope; either field may be absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyReply {
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    /// `base_url` is the proxy origin, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        ProxyClient {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), PROXY_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Localized edit around `hotspot`.
    pub async fn generate_edited_image(
        &self,
        original: &ImageUpload,
        prompt: &str,
        hotspot: Hotspot,
    ) -> Result<String, ClientError> {
        let form = action_form(EditAction::Edit)
            .part(FIELD_ORIGINAL_IMAGE, image_part(original)?)
            .text(FIELD_USER_PROMPT, prompt.to_string())
            .text(FIELD_HOTSPOT_X, hotspot.x.to_string())
            .text(FIELD_HOTSPOT_Y, hotspot.y.to_string());
        self.call(form).await
    }

    /// Background replaced with plain white.
    pub async fn generate_removed_background_image(
        &self,
        original: &ImageUpload,
    ) -> Result<String, ClientError> {
        let form = action_form(EditAction::RemoveBackground)
            .part(FIELD_ORIGINAL_IMAGE, image_part(original)?);
        self.call(form).await
    }

    pub async fn generate_adjusted_image(
        &self,
        original: &ImageUpload,
        adjustment_prompt: &str,
    ) -> Result<String, ClientError> {
        let form = action_form(EditAction::Adjust)
            .part(FIELD_ORIGINAL_IMAGE, image_part(original)?)
            .text(FIELD_ADJUSTMENT_PROMPT, adjustment_prompt.to_string());
        self.call(form).await
    }

    /// Moves an element of `source` into `main`.
    pub async fn generate_combined_image(
        &self,
        main: &ImageUpload,
        source: &ImageUpload,
        prompt: &str,
    ) -> Result<String, ClientError> {
        let form = action_form(EditAction::Combine)
            .part(FIELD_MAIN_IMAGE, image_part(main)?)
            .part(FIELD_SOURCE_IMAGE, image_part(source)?)
            .text(FIELD_USER_PROMPT, prompt.to_string());
        self.call(form).await
    }

    async fn call(&self, form: Form) -> Result<String, ClientError> {
        let outcome = self.send(form).await;
        if let Err(e) = &outcome {
            tracing::error!(endpoint = %self.endpoint, "API call failed: {}", e);
        }
        outcome
    }

    async fn send(&self, form: Form) -> Result<String, ClientError> {
        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let reply: ProxyReply =
                serde_json::from_slice(&body).map_err(|_| ClientError::InvalidJson)?;
            return Err(match reply.message {
                Some(message) if !message.is_empty() => ClientError::Api(message),
                _ => ClientError::Status(status.as_u16()),
            });
        }

        let reply: ProxyReply = serde_json::from_slice(&body).map_err(|_| ClientError::InvalidJson)?;
        reply
            .image_url
            .filter(|url| !url.is_empty())
            .ok_or(ClientError::MissingImageUrl)
    }
}

fn action_form(action: EditAction) -> Form {
    Form::new().text(FIELD_ACTION, action.as_str())
}

/// Unparsable MIME types are sent as `application/octet-stream`; the proxy
/// sniffs the bytes and decides.
fn image_part(image: &ImageUpload) -> Result<Part, ClientError> {
    let extension = image.mime_type.rsplit('/').next().unwrap_or("bin");
    let declared = Part::bytes(image.bytes.clone())
        .file_name(format!("image.{}", extension))
        .mime_str(&image.mime_type);

    match declared {
        Ok(part) => Ok(part),
        Err(e) => {
            tracing::debug!(mime_type = %image.mime_type, "Sending upload untyped: {}", e);
            Ok(Part::bytes(image.bytes.clone())
                .file_name("image.bin")
                .mime_str(FALLBACK_MIME_TYPE)?)
        }
    }
}
