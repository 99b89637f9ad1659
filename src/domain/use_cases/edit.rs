use crate::{
    constants::MISSING_API_KEY_MESSAGE,
    entities::{edit_request::EditRequest, model_content::GenerateContentRequest},
    errors::AppError,
    providers::image_model::ImageModel,
    settings::ApiKey,
    use_cases::response::normalize_response,
    utils::form::FormData,
};

pub struct EditHandler<M>
where
    M: ImageModel,
{
    pub model: M,
    api_key: Option<ApiKey>,
}

impl<M> EditHandler<M>
where
    M: ImageModel,
{
    pub fn new(model: M, api_key: Option<ApiKey>) -> Self {
        EditHandler { model, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Returns the credential, or the configuration failure when none is set.
    pub fn ensure_configured(&self) -> Result<&ApiKey, AppError> {
        self.api_key
            .as_ref()
            .ok_or_else(|| AppError::Configuration(MISSING_API_KEY_MESSAGE.to_string()))
    }

    /// Validates a submitted form and runs the edit it describes.
    pub async fn process_form(&self, form: FormData) -> Result<String, AppError> {
        self.ensure_configured()?;
        let request = EditRequest::from_form(form)?;
        self.process(request).await
    }

    /// Calls the model exactly once and returns the resulting image data URL.
    pub async fn process(&self, request: EditRequest) -> Result<String, AppError> {
        let api_key = self.ensure_configured()?;
        let action = request.action();

        tracing::info!(%action, images = request.images().len(), "Dispatching edit to image model");

        let payload = GenerateContentRequest::from_parts(request.to_parts());
        let response = self.model.generate_content(api_key, &payload).await?;

        normalize_response(response, action).inspect_err(|e| {
            tracing::warn!(%action, error = %e, "Model reply carried no usable image");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::{FIELD_ACTION, FIELD_ORIGINAL_IMAGE},
        entities::{
            edit_request::{EditAction, Hotspot, ImageUpload},
            instruction::{OUTPUT_CLAUSE, SAFETY_CLAUSE},
            model_content::{Candidate, Content, GenerateContentResponse, Part, PromptFeedback},
        },
        providers::image_model::MockImageModel,
        utils::form::FormField,
    };

    fn image_reply() -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { role: None, parts: vec![Part::inline("image/png", "AAAA")] }),
                finish_reason: Some("STOP".into()),
            }],
            prompt_feedback: None,
        }
    }

    fn png() -> ImageUpload {
        ImageUpload::new("image/png", vec![0, 0, 0])
    }

    fn requests() -> Vec<EditRequest> {
        vec![
            EditRequest::Edit { image: png(), prompt: "remove the mug".into(), hotspot: Hotspot::new(1.0, 2.0) },
            EditRequest::RemoveBackground { image: png() },
            EditRequest::Adjust { image: png(), prompt: "warmer".into() },
            EditRequest::Combine { main: png(), source: png(), prompt: "add the hat".into() },
        ]
    }

    #[actix_rt::test]
    async fn each_action_calls_the_model_once() {
        for request in requests() {
            let expected_images = request.images().len();
            let mut model = MockImageModel::new();
            model
                .expect_generate_content()
                .times(1)
                .returning(move |key, payload| {
                    assert_eq!(key.expose(), "test-key");
                    let parts = payload.parts();
                    assert_eq!(parts.len(), expected_images + 1);
                    assert!(parts[..expected_images].iter().all(|p| p.inline_data.is_some()));
                    let text = parts.last().unwrap().text.as_deref().unwrap();
                    assert!(text.contains(SAFETY_CLAUSE));
                    assert!(text.ends_with(OUTPUT_CLAUSE));
                    Ok(image_reply())
                });

            let handler = EditHandler::new(model, Some(ApiKey::new("test-key")));
            let url = handler.process(request).await.unwrap();
            assert_eq!(url, "data:image/png;base64,AAAA");
        }
    }

    #[actix_rt::test]
    async fn missing_key_never_reaches_the_model() {
        let mut model = MockImageModel::new();
        model.expect_generate_content().times(0);

        let handler = EditHandler::new(model, None);
        assert!(!handler.is_configured());

        let err = handler.process(requests().remove(1)).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(err.to_string(), MISSING_API_KEY_MESSAGE);
    }

    #[actix_rt::test]
    async fn missing_key_is_reported_before_form_validation() {
        let mut model = MockImageModel::new();
        model.expect_generate_content().times(0);

        let handler = EditHandler::new(model, None);
        let form = FormData::default().with(FIELD_ACTION, FormField::text("rotate"));

        assert!(matches!(
            handler.process_form(form).await,
            Err(AppError::Configuration(_))
        ));
    }

    #[actix_rt::test]
    async fn invalid_action_never_reaches_the_model() {
        let mut model = MockImageModel::new();
        model.expect_generate_content().times(0);

        let handler = EditHandler::new(model, Some(ApiKey::new("test-key")));
        let form = FormData::default()
            .with(FIELD_ACTION, FormField::text("rotate"))
            .with(FIELD_ORIGINAL_IMAGE, FormField::file("image/png", vec![1]));

        let err = handler.process_form(form).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidAction));
    }

    #[actix_rt::test]
    async fn blocked_reply_surfaces_block_reason() {
        let mut model = MockImageModel::new();
        model.expect_generate_content().times(1).returning(|_, _| {
            Ok(GenerateContentResponse {
                candidates: vec![],
                prompt_feedback: Some(PromptFeedback {
                    block_reason: Some("SAFETY".into()),
                    block_reason_message: None,
                }),
            })
        });

        let handler = EditHandler::new(model, Some(ApiKey::new("test-key")));
        let err = handler.process(requests().remove(2)).await.unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[actix_rt::test]
    async fn upstream_failure_is_passed_through() {
        let mut model = MockImageModel::new();
        model
            .expect_generate_content()
            .times(1)
            .returning(|_, _| Err(AppError::Upstream("quota exceeded".into())));

        let handler = EditHandler::new(model, Some(ApiKey::new("test-key")));
        let err = handler.process(requests().remove(0)).await.unwrap_err();
        assert_eq!(err.to_string(), "Falha na chamada ao modelo de IA: quota exceeded");
    }

    #[actix_rt::test]
    async fn empty_reply_names_the_attempted_action() {
        let mut model = MockImageModel::new();
        model
            .expect_generate_content()
            .times(1)
            .returning(|_, _| Ok(GenerateContentResponse::default()));

        let handler = EditHandler::new(model, Some(ApiKey::new("test-key")));
        let err = handler.process(requests().remove(3)).await.unwrap_err();
        assert!(matches!(err, AppError::NoImage(label) if label == EditAction::Combine.context_label()));
    }
}
