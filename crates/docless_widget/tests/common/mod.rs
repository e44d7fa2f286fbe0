//! Shared test doubles: a scripted assistant, a recording host, and a
//! recording container.

#![allow(dead_code)]

use async_trait::async_trait;
use docless_client::{Assistant, AssistantResponse, Attachment, ClientError};
use docless_widget::{Container, Host, Toast};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Mutex;

/// One recorded `ask`: the query and the attached file name, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub query: String,
    pub file: Option<String>,
}

/// Answers from a queue of canned results and records every call.
#[derive(Default)]
pub struct ScriptedAssistant {
    replies: Mutex<VecDeque<Result<AssistantResponse, ClientError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedAssistant {
    pub fn new(replies: Vec<Result<AssistantResponse, ClientError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Assistant for ScriptedAssistant {
    async fn ask(
        &self,
        query: &str,
        file: Option<&Attachment>,
    ) -> Result<AssistantResponse, ClientError> {
        self.calls.lock().unwrap().push(Call {
            query: query.to_string(),
            file: file.map(|f| f.file_name.clone()),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted reply".into())))
    }
}

pub fn reply(res: &str) -> Result<AssistantResponse, ClientError> {
    Ok(AssistantResponse {
        res: res.to_string(),
        image: None,
        element_id: None,
        route: None,
    })
}

pub fn reply_with_route(res: &str, route: &str) -> Result<AssistantResponse, ClientError> {
    Ok(AssistantResponse {
        res: res.to_string(),
        image: None,
        element_id: None,
        route: Some(route.to_string()),
    })
}

pub fn reply_with_image(res: &str, image: &str) -> Result<AssistantResponse, ClientError> {
    Ok(AssistantResponse {
        res: res.to_string(),
        image: Some(image.to_string()),
        element_id: None,
        route: None,
    })
}

/// Records every side effect the widget requests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub toasts: Vec<Toast>,
    pub navigations: Vec<String>,
    pub scrolls: usize,
}

impl Host for RecordingHost {
    fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    fn navigate(&mut self, route: &str) {
        self.navigations.push(route.to_string());
    }

    fn scroll_to_latest(&mut self) {
        self.scrolls += 1;
    }
}

/// Container whose roots stay observable after it is moved into a mount.
#[derive(Debug, Default, Clone)]
pub struct SharedContainer {
    pub roots: Rc<RefCell<Vec<String>>>,
}

impl Container for SharedContainer {
    fn attach_root(&mut self, id: &str) {
        self.roots.borrow_mut().push(id.to_string());
    }

    fn detach_root(&mut self, id: &str) {
        self.roots.borrow_mut().retain(|r| r != id);
    }
}

pub fn attachment(name: &str) -> Attachment {
    Attachment::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
}
