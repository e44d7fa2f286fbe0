//! Integration tests for mount/unmount and the attribute loader, end to end
//! against a mock chat API.

mod common;

use common::{RecordingHost, SharedContainer};
use docless_client::DoclessConfig;
use docless_widget::{bootstrap, mount, Role, ToastKind, ROOT_ID};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn mount_attaches_root_and_unmount_removes_it() {
    let container = SharedContainer::default();
    let roots = container.roots.clone();

    let handle = mount(container, DoclessConfig::new("app-key"), RecordingHost::default())
        .expect("mount should succeed");
    assert_eq!(*roots.borrow(), vec![ROOT_ID.to_string()]);
    assert!(!handle.widget().is_open());
    assert_eq!(handle.widget().assistant().config().app_key(), "app-key");

    let container = handle.unmount();
    assert!(roots.borrow().is_empty());
    assert!(container.roots.borrow().is_empty());
}

#[test]
fn mount_rejects_blank_key_without_touching_container() {
    let container = SharedContainer::default();
    let roots = container.roots.clone();

    let result = mount(container, DoclessConfig::new("  "), RecordingHost::default());
    assert!(result.is_err());
    assert!(roots.borrow().is_empty());
}

#[test]
fn bootstrap_without_app_key_does_nothing() {
    let container = SharedContainer::default();
    let roots = container.roots.clone();

    let handle = bootstrap([("src", "https://cdn.example.com/loader.js")], container, RecordingHost::default())
        .expect("bootstrap should not fail");
    assert!(handle.is_none());
    assert!(roots.borrow().is_empty());
}

#[test]
fn bootstrap_with_app_key_mounts() {
    let container = SharedContainer::default();
    let roots = container.roots.clone();

    let handle = bootstrap(
        [("src", "loader.js"), ("data-app-key", "tenant-42")],
        container,
        RecordingHost::default(),
    )
    .expect("bootstrap should not fail")
    .expect("widget should be mounted");

    assert_eq!(handle.widget().assistant().config().app_key(), "tenant-42");
    assert_eq!(roots.borrow().len(), 1);
}

#[tokio::test]
async fn mounted_widget_talks_to_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "res": "see this page",
            "image": null,
            "elementId": null,
            "route": "/pricing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = DoclessConfig::new("app-key").with_base_url(server.uri());
    let mut handle = mount(SharedContainer::default(), config, RecordingHost::default()).unwrap();
    let widget = handle.widget_mut();
    widget.open();
    widget.set_input("pricing?");
    assert!(widget.send_message().await);

    let last = widget.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, "see this page");

    let index = widget.messages().len() - 1;
    assert!(widget.follow_route(index));
    assert_eq!(widget.host().navigations, vec!["/pricing"]);
}

#[tokio::test]
async fn mounted_widget_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "server exploded" })))
        .mount(&server)
        .await;

    let config = DoclessConfig::new("app-key").with_base_url(server.uri());
    let mut handle = mount(SharedContainer::default(), config, RecordingHost::default()).unwrap();
    let widget = handle.widget_mut();
    widget.open();
    widget.set_input("hello");
    assert!(widget.send_message().await);

    assert!(!widget.is_sending());
    assert_eq!(widget.input(), "hello");
    let toast = widget.host().toasts.last().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.text, "DoclessAI Error: server exploded");
}
