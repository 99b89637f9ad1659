use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Path the front end posts edit forms to.
pub const PROXY_PATH: &str = "/api/proxy";

pub const MISSING_API_KEY_MESSAGE: &str =
    "A chave de API não está configurada no servidor. Verifique as variáveis de ambiente do servidor.";

// Multipart field names shared by the proxy and its client.
pub const FIELD_ACTION: &str = "action";
pub const FIELD_ORIGINAL_IMAGE: &str = "originalImage";
pub const FIELD_USER_PROMPT: &str = "userPrompt";
pub const FIELD_HOTSPOT_X: &str = "hotspotX";
pub const FIELD_HOTSPOT_Y: &str = "hotspotY";
pub const FIELD_ADJUSTMENT_PROMPT: &str = "adjustmentPrompt";
pub const FIELD_MAIN_IMAGE: &str = "mainImage";
pub const FIELD_SOURCE_IMAGE: &str = "sourceImage";
