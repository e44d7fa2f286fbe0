//! Wire types for `POST {base_url}/chat`. Client ↔ server JSON.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Multipart/JSON field carrying the app key.
pub const FIELD_APP_KEY: &str = "appKey";
/// Multipart/JSON field carrying the query text.
pub const FIELD_QUERY: &str = "query";
/// Multipart field carrying the attached image.
pub const FIELD_IMAGE: &str = "image";

/// Client → server: JSON body used when nothing is attached.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    #[serde(rename = "appKey")]
    pub app_key: &'a str,
    pub query: &'a str,
}

impl<'a> ChatRequest<'a> {
    pub fn new(app_key: &'a str, query: &'a str) -> Self {
        Self { app_key, query }
    }
}

/// Server → client: assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub res: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "elementId", default)]
    pub element_id: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
}

impl AssistantResponse {
    /// Parse and validate a success body. `res` must be a string; the other
    /// fields may be missing, null, or strings.
    pub fn from_body(body: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
        if !value.is_object() {
            return Err("expected a JSON object".into());
        }
        match value.get("res") {
            Some(serde_json::Value::String(_)) => {}
            Some(_) => return Err("field `res` is not a string".into()),
            None => return Err("missing field `res`".into()),
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }
}

/// Server → client: error body on a non-success status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Best-effort server message; `None` when the body is absent, unparseable, or blank.
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed.message.filter(|m| !m.trim().is_empty())
    }
}

/// A binary file sent under the `image` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self::new(file_name, mime, data))
    }

    /// `data:<mime>;base64,<payload>` form, suitable for inlining as an image source.
    pub fn to_data_url(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime, payload)
    }
}
