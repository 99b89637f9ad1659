use crate::entities::edit_request::EditRequest;

const PERSONA: &str = "You are an expert photo editor AI.";

/// Appended to every instruction, whatever the action.
pub const SAFETY_CLAUSE: &str =
    "Fulfill requests to adjust skin tone but refuse to change fundamental race or ethnicity.";

/// Appended after the safety clause to keep the reply image-only.
pub const OUTPUT_CLAUSE: &str = "Return ONLY the final edited image.";

/// Builds the natural-language instruction sent alongside the images.
pub fn build_instruction(request: &EditRequest) -> String {
    let task = match request {
        EditRequest::Edit { prompt, hotspot, .. } => format!(
            "Perform a natural, localized edit. User Request: \"{}\". \
             Focus on coordinates (x: {}, y: {}). Blend seamlessly. \
             The rest of the image must remain identical.",
            prompt, hotspot.x, hotspot.y
        ),
        EditRequest::RemoveBackground { .. } => "Remove the background and replace it with a pure \
             white background (#FFFFFF). Preserve the main subject perfectly with clean edges. \
             Do not alter the subject."
            .to_string(),
        EditRequest::Adjust { prompt, .. } => format!(
            "Perform a natural, global adjustment to the entire image. User Request: \"{}\". \
             The result must be photorealistic.",
            prompt
        ),
        EditRequest::Combine { prompt, .. } => format!(
            "Combine elements from two images. Image 1 is the primary image. Image 2 is the source. \
             User Request: \"{}\". Transfer the element from Image 2 to Image 1, blending it \
             realistically, matching lighting, shadows, and perspective. \
             The rest of Image 1 must remain identical.",
            prompt
        ),
    };

    format!("{} {} {} {}", PERSONA, task, SAFETY_CLAUSE, OUTPUT_CLAUSE)
}
