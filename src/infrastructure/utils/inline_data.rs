use base64::{engine::general_purpose::STANDARD, DecodeError, Engine as _};
use derive_more::Display;

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Encodes raw bytes as standard base64, the only inline form the model accepts.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode(data: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(data)
}

/// Builds a self-contained `data:` URL from an already encoded payload.
pub fn data_url(mime_type: &str, data: &str) -> String {
    format!("data:{};base64,{}", mime_type, data)
}

/// Guesses a MIME type from the leading magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    infer::get(bytes).map(|kind| kind.mime_type())
}

/// Keeps a declared content type unless it is missing or generic, in which
/// case the bytes are sniffed.
pub fn resolve_mime(declared: Option<&str>, bytes: &[u8]) -> String {
    match declared.map(str::trim) {
        Some(mime) if !mime.is_empty() && mime != FALLBACK_MIME_TYPE => mime.to_string(),
        _ => sniff_mime(bytes).unwrap_or(FALLBACK_MIME_TYPE).to_string(),
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum DataUrlError {
    #[display("not a data URL")]
    NotDataUrl,

    #[display("data URL is not base64 encoded")]
    NotBase64,

    #[display("invalid base64 payload: {_0}")]
    InvalidPayload(String),
}

/// Splits a `data:<mime>;base64,<data>` URL back into its MIME type and bytes.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::NotDataUrl)?;
    let (header, data) = rest.split_once(',').ok_or(DataUrlError::NotDataUrl)?;
    let mime_type = header.strip_suffix(";base64").ok_or(DataUrlError::NotBase64)?;

    let bytes = decode(data).map_err(|e| DataUrlError::InvalidPayload(e.to_string()))?;
    Ok((mime_type.to_string(), bytes))
}
