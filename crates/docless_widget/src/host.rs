//! Host seam: the side effects a widget asks its embedding page to perform.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown over the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
}

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            text: text.into(),
        }
    }
}

/// Implemented by whatever embeds the widget.
pub trait Host {
    /// Show a transient notification.
    fn notify(&mut self, toast: Toast);

    /// Navigate the whole page to `route` (not in-app routing).
    fn navigate(&mut self, route: &str);

    /// Scroll the message list to the newest entry.
    fn scroll_to_latest(&mut self) {}
}
