//! In-memory transport and client fixture for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::client::{ApiClient, ApiRequest, ApiResponse, Transport, TransportError};
use super::config::ApiConfig;
use crate::state::auth::{SessionStore, TOKEN_KEY};
use crate::util::location::StaticLocation;
use crate::util::storage::{KeyValueStore, MemoryStorage};

pub const BASE_URL: &str = "http://api.test";

/// Records every request and replays queued outcomes in order. Once the
/// queue is empty it answers `200 {}`.
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    outcomes: Rc<RefCell<VecDeque<Result<ApiResponse, TransportError>>>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &str) {
        self.outcomes.borrow_mut().push_back(Ok(ApiResponse { status, body: body.to_owned() }));
    }

    pub fn fail(&self, error: TransportError) {
        self.outcomes.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests.borrow().last().cloned().expect("no request was sent")
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse { status: 200, body: "{}".to_owned() }))
    }
}

pub struct Fixture {
    pub client: ApiClient<MockTransport>,
    pub transport: MockTransport,
    pub storage: MemoryStorage,
    pub location: StaticLocation,
}

/// Client over fresh in-memory parts, optionally with a persisted token,
/// sitting on page `path`.
pub fn fixture(token: Option<&str>, path: &str) -> Fixture {
    let storage = MemoryStorage::new();
    if let Some(token) = token {
        storage.set_item(TOKEN_KEY, token);
    }
    let session = SessionStore::load(storage.clone());
    let transport = MockTransport::default();
    let location = StaticLocation::new(path);
    let client = ApiClient::new(ApiConfig::new(BASE_URL), transport.clone(), session, location.clone());
    Fixture { client, transport, storage, location }
}
