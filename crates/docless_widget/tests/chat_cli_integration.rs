//! Integration tests for the `docless-chat` terminal host against a mock chat API.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_cmd(server: &MockServer) -> Command {
    let mut cmd = Command::from(cargo_bin_cmd!("docless-chat"));
    cmd.arg("--app-key")
        .arg("chat-key")
        .arg("--base-url")
        .arg(server.uri());
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn conversation_with_route_navigation() {
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

    chat_cmd(&server)
        .write_stdin("how much?\n/go 2\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello! How can I help you today?"))
        .stdout(predicate::str::contains("[1] you: how much?"))
        .stdout(predicate::str::contains("[2] bot: see this page"))
        .stdout(predicate::str::contains("Explore Page -> /pricing"))
        .stdout(predicate::str::contains("navigate: /pricing"));
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_send_shows_error_toast() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "server exploded" })))
        .mount(&server)
        .await;

    chat_cmd(&server)
        .write_stdin("hello\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("[error] DoclessAI Error: server exploded"));
}

#[tokio::test(flavor = "multi_thread")]
async fn attach_sends_image_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_string_contains("filename=\"pic.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "res": "nice picture" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_string_contains("\"query\":\"thanks\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "res": "welcome" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("pic.png");
    std::fs::write(&image, b"fake png").unwrap();

    chat_cmd(&server)
        .write_stdin(format!("/attach {}\nwhat is this?\nthanks\n", image.display()))
        .assert()
        .success()
        .stderr(predicate::str::contains("[ok] Attached: pic.png"))
        .stdout(predicate::str::contains("nice picture"))
        .stdout(predicate::str::contains("welcome"));
}

#[tokio::test(flavor = "multi_thread")]
async fn json_mode_prints_views() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "res": "hi there" })))
        .mount(&server)
        .await;

    chat_cmd(&server)
        .arg("--json")
        .write_stdin("hello\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\":\"panel\""))
        .stdout(predicate::str::contains("\"content\":\"hi there\""));
}

#[test]
fn missing_app_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "base_url: http://127.0.0.1:9\n").unwrap();

    Command::from(cargo_bin_cmd!("docless-chat"))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing app key"));
}
