//! HTTP client: POST a query (and optional image) to `{base_url}/chat` and
//! return the validated assistant reply.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::config::{ConfigError, DoclessConfig};
use crate::messages::{
    AssistantResponse, Attachment, ChatRequest, ErrorBody, FIELD_APP_KEY, FIELD_IMAGE, FIELD_QUERY,
};

/// Value of the `X-SDK-Name` header.
pub const SDK_NAME: &str = "@doclessai/sdk";
/// Value of the `X-SDK-Version` header.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Why a call to [`DoclessClient::ask`] failed. `Display` is the normalized,
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// No response within the configured timeout; the request was aborted.
    #[error("DoclessAI Error: Request timed out.")]
    TimedOut,

    /// Non-success status. `message` is the server's `message` field, or a
    /// generic "request failed with status N" text.
    #[error("DoclessAI Error: {message}")]
    Http { status: u16, message: String },

    /// Transport failure (connection refused, reset, unreadable body).
    #[error("DoclessAI Error: {0}")]
    Network(String),

    /// 2xx body that is not a valid assistant reply.
    #[error("DoclessAI Error: Malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::TimedOut
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// Anything that can answer a query. Implemented by [`DoclessClient`]; the
/// widget is generic over it.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn ask(
        &self,
        query: &str,
        file: Option<&Attachment>,
    ) -> Result<AssistantResponse, ClientError>;
}

/// Chat API client. Cheap to share; each `ask` is an independent request.
#[derive(Debug, Clone)]
pub struct DoclessClient {
    config: DoclessConfig,
    http: reqwest::Client,
}

impl DoclessClient {
    /// Build a client. Fails if the app key is blank.
    pub fn new(config: DoclessConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &DoclessConfig {
        &self.config
    }

    /// Send a query, with `file` as a multipart `image` part when present.
    /// The whole exchange is bounded by the configured timeout; on expiry the
    /// request future is dropped and [`ClientError::TimedOut`] is returned.
    pub async fn ask(
        &self,
        query: &str,
        file: Option<&Attachment>,
    ) -> Result<AssistantResponse, ClientError> {
        let url = self.config.chat_url();
        let timeout = self.config.timeout();
        debug!(%url, attachment = file.is_some(), "sending chat request");

        match tokio::time::timeout(timeout, self.exchange(&url, query, file)).await {
            Ok(Ok(response)) => {
                debug!(route = ?response.route, "chat request succeeded");
                Ok(response)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "chat request failed");
                Err(e)
            }
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "chat request timed out, aborted");
                Err(ClientError::TimedOut)
            }
        }
    }

    async fn exchange(
        &self,
        url: &str,
        query: &str,
        file: Option<&Attachment>,
    ) -> Result<AssistantResponse, ClientError> {
        let request = self
            .http
            .post(url)
            .header("X-SDK-Name", SDK_NAME)
            .header("X-SDK-Version", SDK_VERSION);
        let request = match file {
            Some(file) => request.multipart(self.form(query, file)),
            None => request.json(&ChatRequest::new(self.config.app_key(), query)),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), "chat response received");

        if !status.is_success() {
            let message = ErrorBody::message_from(&body).unwrap_or_else(|| {
                format!("DoclessAI Request failed with status {}", status.as_u16())
            });
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        AssistantResponse::from_body(&body).map_err(ClientError::MalformedResponse)
    }

    fn form(&self, query: &str, file: &Attachment) -> Form {
        let part = || Part::bytes(file.data.clone()).file_name(file.file_name.clone());
        // An unparseable MIME string just leaves the part untyped.
        let image = part().mime_str(&file.mime).unwrap_or_else(|_| part());
        Form::new()
            .text(FIELD_APP_KEY, self.config.app_key().to_string())
            .text(FIELD_QUERY, query.to_string())
            .part(FIELD_IMAGE, image)
    }
}

#[async_trait]
impl Assistant for DoclessClient {
    async fn ask(
        &self,
        query: &str,
        file: Option<&Attachment>,
    ) -> Result<AssistantResponse, ClientError> {
        DoclessClient::ask(self, query, file).await
    }
}
