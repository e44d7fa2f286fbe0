//! Mounting a widget into a host surface, and the attribute-driven loader.

use docless_client::{ConfigError, DoclessClient, DoclessConfig};
use tracing::{debug, info};

use crate::host::Host;
use crate::widget::ChatWidget;

/// Id of the root element a mounted widget lives in.
pub const ROOT_ID: &str = "docless-ai-root";

/// Loader attribute carrying the app key.
pub const APP_KEY_ATTRIBUTE: &str = "data-app-key";

/// Surface a widget root is created in (e.g. a page body).
pub trait Container {
    fn attach_root(&mut self, id: &str);
    fn detach_root(&mut self, id: &str);
}

/// A widget mounted into a container. Dropping the handle leaves the root in
/// place; call [`MountHandle::unmount`] to remove it.
pub struct MountHandle<C: Container, H: Host> {
    container: C,
    widget: ChatWidget<DoclessClient, H>,
}

impl<C: Container, H: Host> MountHandle<C, H> {
    pub fn widget(&self) -> &ChatWidget<DoclessClient, H> {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut ChatWidget<DoclessClient, H> {
        &mut self.widget
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Remove the root and hand the container back. The widget is dropped.
    pub fn unmount(mut self) -> C {
        self.container.detach_root(ROOT_ID);
        debug!(root = ROOT_ID, "widget unmounted");
        self.container
    }
}

/// Build a client from `config`, create the widget root in `container`, and
/// return the handle owning both.
pub fn mount<C: Container, H: Host>(
    mut container: C,
    config: DoclessConfig,
    host: H,
) -> Result<MountHandle<C, H>, ConfigError> {
    let client = DoclessClient::new(config)?;
    container.attach_root(ROOT_ID);
    info!(root = ROOT_ID, base_url = client.config().base_url(), "widget mounted");
    Ok(MountHandle {
        container,
        widget: ChatWidget::new(client, host),
    })
}

/// Non-blank `data-app-key` value among the loader's attributes.
pub fn app_key_from_attributes<'a, I>(attributes: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    attributes
        .into_iter()
        .find(|(name, _)| *name == APP_KEY_ATTRIBUTE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Loader entry point: mount with default settings when the attributes carry
/// an app key, otherwise do nothing.
pub fn bootstrap<'a, I, C, H>(
    attributes: I,
    container: C,
    host: H,
) -> Result<Option<MountHandle<C, H>>, ConfigError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
    C: Container,
    H: Host,
{
    let Some(app_key) = app_key_from_attributes(attributes) else {
        debug!("no {} attribute, widget not mounted", APP_KEY_ATTRIBUTE);
        return Ok(None);
    };
    mount(container, DoclessConfig::new(app_key), host).map(Some)
}
