//! Render model: a snapshot of what the widget shows, derived from its state.
//! Hosts draw this however they like; `Display` gives a plain-text rendering.

use serde::Serialize;
use std::fmt;

use crate::message::Role;

/// Label of the control that follows an assistant-suggested route.
pub const ROUTE_BUTTON_LABEL: &str = "Explore Page";
/// Footer line under the input.
pub const FOOTER: &str = "Powered by DoclessAI";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetView {
    pub surface: Surface,
    /// Full-screen overlay image, drawn above everything else.
    pub zoomed_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Surface {
    /// Floating icon; the chat panel is closed.
    Launcher,
    Panel(PanelView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub title: String,
    pub messages: Vec<MessageView>,
    /// "<name> is thinking..." while a send is in flight.
    pub typing_indicator: Option<String>,
    pub attachment_label: Option<String>,
    pub input: String,
    pub send_enabled: bool,
    pub footer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    pub index: usize,
    pub role: Role,
    pub content: String,
    pub image: Option<String>,
    pub route_button: Option<RouteButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteButton {
    pub label: &'static str,
    pub route: String,
}

impl WidgetView {
    pub fn panel(&self) -> Option<&PanelView> {
        match &self.surface {
            Surface::Panel(p) => Some(p),
            Surface::Launcher => None,
        }
    }
}

impl fmt::Display for WidgetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(image) = &self.zoomed_image {
            writeln!(f, "[zoomed image: {}]  (/unzoom to close)", image)?;
        }
        match &self.surface {
            Surface::Launcher => writeln!(f, "[chat closed]  (/open to start)"),
            Surface::Panel(panel) => write!(f, "{}", panel),
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for msg in &self.messages {
            write!(f, "{}", msg)?;
        }
        if let Some(typing) = &self.typing_indicator {
            writeln!(f, "   {}", typing)?;
        }
        if let Some(label) = &self.attachment_label {
            writeln!(f, "   [attached: {}]", label)?;
        }
        writeln!(f, "-- {} --", self.footer)
    }
}

impl fmt::Display for MessageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = match self.role {
            Role::User => "you",
            Role::Assistant => "bot",
        };
        writeln!(f, "[{}] {}: {}", self.index, who, self.content)?;
        if let Some(image) = &self.image {
            if image.starts_with("data:") {
                writeln!(f, "      (image attached, /zoom {})", self.index)?;
            } else {
                writeln!(f, "      (image: {}, /zoom {})", image, self.index)?;
            }
        }
        if let Some(button) = &self.route_button {
            writeln!(
                f,
                "      [{} -> {}]  (/go {})",
                button.label, button.route, self.index
            )?;
        }
        Ok(())
    }
}
