//! DoclessAI client library (config, wire types, HTTP chat client).
//! Used by the chat widget and the `docless` CLI.

pub mod client;
pub mod config;
pub mod messages;

pub use client::{Assistant, ClientError, DoclessClient, SDK_NAME, SDK_VERSION};
pub use config::{default_config_path, ConfigError, ConfigFile, DoclessConfig};
pub use messages::{AssistantResponse, Attachment};
