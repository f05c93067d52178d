//! In-memory collaborators and request helpers for handler tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use playhook_app::executors::{Dispatch, ExecutionContext, ExecutionOutcome};
use playhook_app::notification_bus::InProcessNotificationBus;
use playhook_app::ports::{DocumentStore, ProcessControl, ProcessInfo};
use playhook_app::services::{DocumentHandle, LifecycleService};
use playhook_domain::action::Action;
use playhook_domain::document::Document;
use playhook_domain::error::PlayhookError;

use crate::state::AppState;

#[derive(Clone, Default)]
pub struct StubProcesses;

impl ProcessControl for StubProcesses {
    async fn list(&self) -> Result<Vec<ProcessInfo>, PlayhookError> {
        Ok(Vec::new())
    }

    async fn launch(&self, _path: &str, _args: &[String]) -> Result<u32, PlayhookError> {
        Ok(4242)
    }

    async fn terminate(&self, _pid: u32) -> Result<(), PlayhookError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct StubDispatcher {
    calls: Mutex<Vec<String>>,
}

impl Dispatch for StubDispatcher {
    async fn execute(&self, action: &Action, _ctx: &ExecutionContext) -> ExecutionOutcome {
        self.calls.lock().unwrap().push(action.name.clone());
        ExecutionOutcome::ok("done")
    }
}

#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Option<Document>>,
}

impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Option<Document>, PlayhookError> {
        Ok(self.document.lock().unwrap().clone())
    }

    async fn save(&self, document: &Document) -> Result<(), PlayhookError> {
        *self.document.lock().unwrap() = Some(document.clone());
        Ok(())
    }
}

type TestState =
    AppState<StubProcesses, Arc<StubDispatcher>, Arc<InProcessNotificationBus>>;

pub struct TestApp {
    pub router: Router,
    pub documents: DocumentHandle,
    pub notifications: Arc<InProcessNotificationBus>,
    pub state: TestState,
    dispatcher: Arc<StubDispatcher>,
}

impl TestApp {
    /// Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (documents, _task) = DocumentHandle::spawn(MemoryStore::default(), Document::default());
        let notifications = Arc::new(InProcessNotificationBus::new(16));
        let dispatcher = Arc::new(StubDispatcher::default());
        let lifecycle = LifecycleService::new(
            documents.clone(),
            StubProcesses,
            Arc::clone(&dispatcher),
            Arc::clone(&notifications),
        );
        let state = AppState::new(
            Arc::new(lifecycle),
            documents.clone(),
            Arc::clone(&notifications),
        );
        Self {
            router: crate::router::build(state.clone()),
            documents,
            notifications,
            state,
            dispatcher,
        }
    }

    pub fn dispatched(&self) -> Vec<String> {
        self.dispatcher.calls.lock().unwrap().clone()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
        self.send("POST", uri, body).await
    }

    pub async fn put(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send("DELETE", uri, None).await
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
