//! Chat widget state machine.
//!
//! `closed` ⇄ `open` via [`ChatWidget::toggle`]; within `open`, `idle` ⇄
//! `sending` around one conversation turn. A turn is split into
//! [`ChatWidget::begin_send`] and [`ChatWidget::finish_send`] so an event loop
//! can keep handling input while the request is out;
//! [`ChatWidget::send_message`] runs both around one `ask`.

use docless_client::{Assistant, AssistantResponse, Attachment, ClientError};
use tracing::{debug, warn};

use crate::host::{Host, Toast};
use crate::message::{Message, Role};
use crate::view::{MessageView, PanelView, RouteButton, Surface, WidgetView, FOOTER, ROUTE_BUTTON_LABEL};

/// Header title when no name is given.
pub const DEFAULT_NAME: &str = "Assistant";

/// Snapshot taken when a turn starts; handed back to `finish_send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub query: String,
    pub attachment: Option<Attachment>,
}

pub struct ChatWidget<A, H> {
    assistant: A,
    host: H,
    name: String,
    open: bool,
    input: String,
    messages: Vec<Message>,
    sending: bool,
    attachment: Option<Attachment>,
    zoomed_image: Option<String>,
}

impl<A: Assistant, H: Host> ChatWidget<A, H> {
    /// Closed widget with the greeting as its only message.
    pub fn new(assistant: A, host: H) -> Self {
        Self {
            assistant,
            host,
            name: DEFAULT_NAME.to_string(),
            open: false,
            input: String::new(),
            messages: vec![Message::greeting()],
            sending: false,
            attachment: None,
            zoomed_image: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn zoomed_image(&self) -> Option<&str> {
        self.zoomed_image.as_deref()
    }

    pub fn assistant(&self) -> &A {
        &self.assistant
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Send control is enabled iff the panel is open, nothing is in flight,
    /// and the input has text.
    pub fn can_send(&self) -> bool {
        self.open && !self.sending && !self.input.trim().is_empty()
    }

    /// Select the file to send with the next message, replacing any previous one.
    pub fn attach(&mut self, attachment: Attachment) {
        self.host
            .notify(Toast::success(format!("Attached: {}", attachment.file_name)));
        self.attachment = Some(attachment);
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    /// Start a turn: snapshot and clear the input, append the user message,
    /// enter `sending`. `None` (and no state change) if the widget is closed,
    /// the input is blank, or a turn is already in flight.
    pub fn begin_send(&mut self) -> Option<PendingTurn> {
        if !self.can_send() {
            return None;
        }
        let query = self.input.trim().to_string();
        let attachment = self.attachment.clone();
        self.input.clear();
        self.push(Message::user(query.clone(), attachment.as_ref()));
        self.set_sending(true);
        debug!(attachment = attachment.is_some(), "turn started");
        Some(PendingTurn { query, attachment })
    }

    /// Finish the turn started by `begin_send`. Failures become an error
    /// toast and give the query back to the input. Ignored when no turn is
    /// in flight.
    pub fn finish_send(
        &mut self,
        turn: PendingTurn,
        result: Result<AssistantResponse, ClientError>,
    ) {
        if !self.sending {
            debug!("no turn in flight, result dropped");
            return;
        }
        match result {
            Ok(response) => {
                // A file picked while the request was out stays pending.
                if self.attachment == turn.attachment {
                    self.attachment = None;
                }
                self.push(Message::from(response));
                debug!("turn completed");
            }
            Err(e) => {
                warn!(error = %e, "turn failed");
                self.host.notify(Toast::error(e.to_string()));
                self.input = turn.query;
            }
        }
        self.set_sending(false);
    }

    /// Run one full turn against the assistant. Returns `false` if nothing
    /// was sent.
    pub async fn send_message(&mut self) -> bool {
        let Some(turn) = self.begin_send() else {
            return false;
        };
        let result = self
            .assistant
            .ask(&turn.query, turn.attachment.as_ref())
            .await;
        self.finish_send(turn, result);
        true
    }

    /// Navigate the page to the route carried by message `index`, if any.
    pub fn follow_route(&mut self, index: usize) -> bool {
        let Some(route) = self.messages.get(index).and_then(|m| m.route.clone()) else {
            return false;
        };
        debug!(%route, "following assistant route");
        self.host.navigate(&route);
        true
    }

    /// Show message `index`'s image in the overlay, replacing any zoomed image.
    pub fn zoom_image(&mut self, index: usize) -> bool {
        match self.messages.get(index).and_then(|m| m.image.clone()) {
            Some(image) => {
                self.zoomed_image = Some(image);
                true
            }
            None => false,
        }
    }

    pub fn dismiss_zoom(&mut self) {
        self.zoomed_image = None;
    }

    pub fn view(&self) -> WidgetView {
        let surface = if self.open {
            Surface::Panel(self.panel_view())
        } else {
            Surface::Launcher
        };
        WidgetView {
            surface,
            zoomed_image: self.zoomed_image.clone(),
        }
    }

    fn panel_view(&self) -> PanelView {
        let messages = self
            .messages
            .iter()
            .enumerate()
            .map(|(index, m)| MessageView {
                index,
                role: m.role,
                content: m.content.clone(),
                image: m.image.clone(),
                route_button: match (m.role, &m.route) {
                    (Role::Assistant, Some(route)) => Some(RouteButton {
                        label: ROUTE_BUTTON_LABEL,
                        route: route.clone(),
                    }),
                    _ => None,
                },
            })
            .collect();
        PanelView {
            title: self.name.clone(),
            messages,
            typing_indicator: self
                .sending
                .then(|| format!("{} is thinking...", self.name)),
            attachment_label: self.attachment.as_ref().map(|a| a.file_name.clone()),
            input: self.input.clone(),
            send_enabled: self.can_send(),
            footer: FOOTER,
        }
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.host.scroll_to_latest();
    }

    fn set_sending(&mut self, sending: bool) {
        if self.sending != sending {
            self.sending = sending;
            self.host.scroll_to_latest();
        }
    }
}
