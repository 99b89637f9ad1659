use crate::{
    entities::{
        edit_request::EditAction,
        model_content::{GenerateContentResponse, FINISH_REASON_STOP},
    },
    errors::AppError,
    utils::inline_data,
};

/// Turns a model reply into an image data URL or the matching failure.
///
/// Checks run in a fixed order and the first match decides:
/// 1. a prompt block reason fails the request;
/// 2. the first inline image of the first candidate succeeds;
/// 3. an abnormal finish reason on the first candidate fails the request;
/// 4. anything else fails with the "no image" message for `action`.
pub fn normalize_response(
    response: GenerateContentResponse,
    action: EditAction,
) -> Result<String, AppError> {
    let GenerateContentResponse { candidates, prompt_feedback } = response;

    if let Some(feedback) = prompt_feedback {
        if let Some(reason) = feedback.block_reason.filter(|r| !r.is_empty()) {
            return Err(AppError::Blocked {
                reason,
                message: feedback.block_reason_message,
            });
        }
    }

    let first = candidates.into_iter().next();

    let image = first
        .as_ref()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.iter().find_map(|part| part.inline_data.as_ref()));

    if let Some(image) = image {
        return Ok(inline_data::data_url(&image.mime_type, &image.data));
    }

    match first
        .and_then(|candidate| candidate.finish_reason)
        .filter(|r| !r.is_empty())
    {
        Some(reason) if reason != FINISH_REASON_STOP => Err(AppError::GenerationStopped(reason)),
        _ => Err(AppError::NoImage(action.context_label())),
    }
}
