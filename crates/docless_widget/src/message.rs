//! Conversation messages shown by the widget.

use docless_client::{AssistantResponse, Attachment};
use serde::{Deserialize, Serialize};

/// Greeting every new conversation starts with.
pub const GREETING: &str = "Hello! How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the conversation. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Data URL or URL of an image shown with the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(rename = "elementId", skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>, attachment: Option<&Attachment>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            image: attachment.map(Attachment::to_data_url),
            route: None,
            element_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            image: None,
            route: None,
            element_id: None,
        }
    }

    pub fn greeting() -> Self {
        Self::assistant(GREETING)
    }
}

impl From<AssistantResponse> for Message {
    fn from(r: AssistantResponse) -> Self {
        Self {
            role: Role::Assistant,
            content: r.res,
            image: r.image,
            route: r.route,
            element_id: r.element_id,
        }
    }
}
