use serde::Serialize;

/// The JSON body the proxy answers with: an image data URL on success,
/// a human readable message otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApiEnvelope {
    Success {
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
    Failure {
        message: String,
    },
}

impl ApiEnvelope {
    pub fn success(image_url: impl Into<String>) -> Self {
        ApiEnvelope::Success { image_url: image_url.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiEnvelope::Failure { message: message.into() }
    }
}
