use async_trait::async_trait;

use crate::{
    entities::model_content::{GenerateContentRequest, GenerateContentResponse},
    errors::AppError,
    settings::ApiKey,
};

/// A hosted generative-image model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageModel: Send + Sync {
    /// Sends one `generateContent` call and returns the raw reply.
    async fn generate_content(
        &self,
        api_key: &ApiKey,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AppError>;
}
