use std::fmt;

use actix_multipart::MultipartError;
use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};

use crate::entities::envelope::ApiEnvelope;

/// Every way a proxy request can fail. All of them reach the caller as a
/// `{"message": ...}` envelope with status 500.
#[derive(Debug)]
pub enum AppError {
    Configuration(String),
    InvalidAction,
    MissingField(&'static str),
    InvalidField(&'static str),
    Multipart(String),
    PayloadTooLarge(usize),
    Blocked {
        reason: String,
        message: Option<String>,
    },
    GenerationStopped(String),
    NoImage(&'static str),
    Upstream(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Configuration(msg) => write!(f, "{}", msg),
            AppError::InvalidAction => write!(f, "Ação inválida."),
            AppError::MissingField(field) => write!(f, "Campo obrigatório ausente: {}.", field),
            AppError::InvalidField(field) => write!(f, "Campo inválido: {}.", field),
            AppError::Multipart(msg) => write!(f, "Formulário inválido: {}", msg),
            AppError::PayloadTooLarge(limit) => {
                write!(f, "O envio excede o limite de {} bytes.", limit)
            }
            AppError::Blocked { reason, message } => {
                let text = format!(
                    "Solicitação bloqueada: {}. {}",
                    reason,
                    message.as_deref().unwrap_or_default()
                );
                write!(f, "{}", text.trim_end())
            }
            AppError::GenerationStopped(reason) => write!(
                f,
                "Geração de imagem parou: {}. Verifique as configurações de segurança.",
                reason
            ),
            AppError::NoImage(context) => {
                write!(f, "O modelo de IA não retornou uma imagem para {}.", context)
            }
            AppError::Upstream(msg) => write!(f, "Falha na chamada ao modelo de IA: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(ApiEnvelope::failure(self.to_string()))
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        match err {
            MultipartError::ContentTypeMissing | MultipartError::ContentTypeIncompatible => {
                AppError::Multipart("o corpo da requisição deve ser multipart/form-data".to_string())
            }
            _ => AppError::Multipart(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}
