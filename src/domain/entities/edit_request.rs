use std::{fmt, str::FromStr};

use crate::{
    constants::{
        FIELD_ACTION, FIELD_ADJUSTMENT_PROMPT, FIELD_HOTSPOT_X, FIELD_HOTSPOT_Y,
        FIELD_MAIN_IMAGE, FIELD_ORIGINAL_IMAGE, FIELD_SOURCE_IMAGE, FIELD_USER_PROMPT,
    },
    entities::{instruction::build_instruction, model_content::Part},
    errors::AppError,
    utils::{
        form::{FormData, FormField},
        inline_data,
    },
};

// ───── Actions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditAction {
    Edit,
    RemoveBackground,
    Adjust,
    Combine,
}

impl EditAction {
    pub const ALL: [EditAction; 4] = [
        EditAction::Edit,
        EditAction::RemoveBackground,
        EditAction::Adjust,
        EditAction::Combine,
    ];

    /// Value of the `action` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditAction::Edit => "edit",
            EditAction::RemoveBackground => "remove-background",
            EditAction::Adjust => "adjust",
            EditAction::Combine => "combine",
        }
    }

    /// How the action is named in user-facing failure messages.
    pub fn context_label(&self) -> &'static str {
        match self {
            EditAction::Edit => "edição",
            EditAction::RemoveBackground => "remoção de fundo",
            EditAction::Adjust => "ajuste",
            EditAction::Combine => "combinação",
        }
    }
}

impl FromStr for EditAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or(AppError::InvalidAction)
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ───── Inputs ───────────────────────────────────────────────────────

/// An uploaded image held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageUpload { mime_type: mime_type.into(), bytes }
    }

    fn from_field(field: FormField) -> Self {
        let mime_type = inline_data::resolve_mime(field.content_type.as_deref(), &field.bytes);
        ImageUpload { mime_type, bytes: field.bytes }
    }

    /// The inline payload part sent to the model.
    pub fn to_part(&self) -> Part {
        Part::inline(self.mime_type.clone(), inline_data::encode(&self.bytes))
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Focus point of a localized edit, in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hotspot {
    pub x: f64,
    pub y: f64,
}

impl Hotspot {
    pub fn new(x: f64, y: f64) -> Self {
        Hotspot { x, y }
    }
}

// ───── Requests ─────────────────────────────────────────────────────

/// One user action with exactly the inputs it needs.
#[derive(Debug, Clone, PartialEq)]
pub enum EditRequest {
    Edit {
        image: ImageUpload,
        prompt: String,
        hotspot: Hotspot,
    },
    RemoveBackground {
        image: ImageUpload,
    },
    Adjust {
        image: ImageUpload,
        prompt: String,
    },
    Combine {
        main: ImageUpload,
        source: ImageUpload,
        prompt: String,
    },
}

impl EditRequest {
    pub fn action(&self) -> EditAction {
        match self {
            EditRequest::Edit { .. } => EditAction::Edit,
            EditRequest::RemoveBackground { .. } => EditAction::RemoveBackground,
            EditRequest::Adjust { .. } => EditAction::Adjust,
            EditRequest::Combine { .. } => EditAction::Combine,
        }
    }

    /// Builds the request for the form's `action`, pulling the fields that
    /// action requires.
    pub fn from_form(mut form: FormData) -> Result<Self, AppError> {
        let action: EditAction = form
            .text(FIELD_ACTION)
            .ok_or(AppError::InvalidAction)?
            .trim()
            .parse()?;

        let request = match action {
            EditAction::Edit => EditRequest::Edit {
                image: ImageUpload::from_field(form.take_file(FIELD_ORIGINAL_IMAGE)?),
                prompt: form.required_text(FIELD_USER_PROMPT)?,
                hotspot: Hotspot::new(
                    coordinate(&form, FIELD_HOTSPOT_X)?,
                    coordinate(&form, FIELD_HOTSPOT_Y)?,
                ),
            },
            EditAction::RemoveBackground => EditRequest::RemoveBackground {
                image: ImageUpload::from_field(form.take_file(FIELD_ORIGINAL_IMAGE)?),
            },
            EditAction::Adjust => EditRequest::Adjust {
                image: ImageUpload::from_field(form.take_file(FIELD_ORIGINAL_IMAGE)?),
                prompt: form.required_text(FIELD_ADJUSTMENT_PROMPT)?,
            },
            EditAction::Combine => EditRequest::Combine {
                main: ImageUpload::from_field(form.take_file(FIELD_MAIN_IMAGE)?),
                source: ImageUpload::from_field(form.take_file(FIELD_SOURCE_IMAGE)?),
                prompt: form.required_text(FIELD_USER_PROMPT)?,
            },
        };

        Ok(request)
    }

    /// The images sent to the model, primary first.
    pub fn images(&self) -> Vec<&ImageUpload> {
        match self {
            EditRequest::Edit { image, .. }
            | EditRequest::RemoveBackground { image }
            | EditRequest::Adjust { image, .. } => vec![image],
            EditRequest::Combine { main, source, .. } => vec![main, source],
        }
    }

    /// Ordered model input: image parts, then the instruction text.
    pub fn to_parts(&self) -> Vec<Part> {
        let mut parts: Vec<Part> = self.images().into_iter().map(ImageUpload::to_part).collect();
        parts.push(Part::text(build_instruction(self)));
        parts
    }
}

fn coordinate(form: &FormData, name: &'static str) -> Result<f64, AppError> {
    form.required_text(name)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(AppError::InvalidField(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_field() -> FormField {
        FormField::file("image/png", PNG.to_vec())
    }

    #[test]
    fn parses_every_action_name() {
        for action in EditAction::ALL {
            assert_eq!(action.as_str().parse::<EditAction>().unwrap(), action);
        }
    }

    #[test]
    fn unknown_action_is_invalid() {
        assert!(matches!("rotate".parse::<EditAction>(), Err(AppError::InvalidAction)));
        assert!(matches!("Edit".parse::<EditAction>(), Err(AppError::InvalidAction)));

        let form = FormData::default().with(FIELD_ORIGINAL_IMAGE, png_field());
        assert!(matches!(EditRequest::from_form(form), Err(AppError::InvalidAction)));
    }

    #[test]
    fn builds_edit_request_with_hotspot() {
        let form = FormData::default()
            .with(FIELD_ACTION, FormField::text("edit"))
            .with(FIELD_ORIGINAL_IMAGE, png_field())
            .with(FIELD_USER_PROMPT, FormField::text("remove the mug"))
            .with(FIELD_HOTSPOT_X, FormField::text("120"))
            .with(FIELD_HOTSPOT_Y, FormField::text("48.5"));

        let request = EditRequest::from_form(form).unwrap();
        assert_eq!(
            request,
            EditRequest::Edit {
                image: ImageUpload::new("image/png", PNG.to_vec()),
                prompt: "remove the mug".into(),
                hotspot: Hotspot::new(120.0, 48.5),
            }
        );
    }

    #[test]
    fn edit_requires_numeric_coordinates() {
        let form = FormData::default()
            .with(FIELD_ACTION, FormField::text("edit"))
            .with(FIELD_ORIGINAL_IMAGE, png_field())
            .with(FIELD_USER_PROMPT, FormField::text("remove the mug"))
            .with(FIELD_HOTSPOT_X, FormField::text("left"))
            .with(FIELD_HOTSPOT_Y, FormField::text("10"));

        assert!(matches!(
            EditRequest::from_form(form),
            Err(AppError::InvalidField(FIELD_HOTSPOT_X))
        ));
    }

    #[test]
    fn adjust_reads_the_adjustment_prompt() {
        let form = FormData::default()
            .with(FIELD_ACTION, FormField::text("adjust"))
            .with(FIELD_ORIGINAL_IMAGE, png_field())
            .with(FIELD_USER_PROMPT, FormField::text("wrong field"));

        assert!(matches!(
            EditRequest::from_form(form),
            Err(AppError::MissingField(FIELD_ADJUSTMENT_PROMPT))
        ));
    }

    #[test]
    fn combine_requires_both_images() {
        let form = FormData::default()
            .with(FIELD_ACTION, FormField::text("combine"))
            .with(FIELD_MAIN_IMAGE, png_field())
            .with(FIELD_USER_PROMPT, FormField::text("add the hat"));

        assert!(matches!(
            EditRequest::from_form(form),
            Err(AppError::MissingField(FIELD_SOURCE_IMAGE))
        ));
    }

    #[test]
    fn untyped_upload_is_sniffed() {
        let form = FormData::default()
            .with(FIELD_ACTION, FormField::text("remove-background"))
            .with(FIELD_ORIGINAL_IMAGE, FormField { bytes: PNG.to_vec(), ..Default::default() });

        let request = EditRequest::from_form(form).unwrap();
        assert_eq!(request.images()[0].mime_type, "image/png");
    }

    #[test]
    fn parts_put_images_first_and_instruction_last() {
        let main = ImageUpload::new("image/png", vec![0, 0, 0]);
        let source = ImageUpload::new("image/jpeg", vec![0xff, 0xd8, 0xff]);
        let request = EditRequest::Combine { main, source, prompt: "add the hat".into() };

        let parts = request.to_parts();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], Part::inline("image/png", "AAAA"));
        assert_eq!(parts[1].inline_data.as_ref().unwrap().mime_type, "image/jpeg");
        assert!(parts[2].text.as_ref().unwrap().contains("add the hat"));
    }

    #[test]
    fn debug_output_hides_image_bytes() {
        let upload = ImageUpload::new("image/png", vec![7; 1024]);
        assert_eq!(format!("{:?}", upload), "ImageUpload { mime_type: \"image/png\", len: 1024 }");
    }
}
