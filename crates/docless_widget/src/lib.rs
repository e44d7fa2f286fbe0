//! DoclessAI chat widget: conversation state machine, render model, and the
//! mount/loader API hosts use to embed it.

pub mod host;
pub mod message;
pub mod mount;
pub mod view;
pub mod widget;

pub use host::{Host, Toast, ToastKind};
pub use message::{Message, Role, GREETING};
pub use mount::{app_key_from_attributes, bootstrap, mount, Container, MountHandle, ROOT_ID};
pub use view::{MessageView, PanelView, RouteButton, Surface, WidgetView};
pub use widget::{ChatWidget, PendingTurn, DEFAULT_NAME};
