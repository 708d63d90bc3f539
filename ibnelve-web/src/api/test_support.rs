//! Scripted transport and storage doubles for client tests.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::client::ApiClient;
use super::transport::{ApiReply, ApiRequest, HttpTransport, TransportError};
use crate::session::{SessionContext, SessionStore};
use crate::storage::{KeyValueStore, MemoryStorage, StorageError};

/// Records requests and answers them from a queue.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    replies: RefCell<VecDeque<Result<ApiReply, TransportError>>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn reply(&self, status: u16, body: &str) {
        self.replies
            .borrow_mut()
            .push_back(Ok(ApiReply::new(status, body)));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError::Network(message.to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> ApiRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        self.requests.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted reply".to_string())))
    }
}

/// Memory storage that logs reads and can be switched to fail, either
/// entirely or only for writes to one key.
#[derive(Debug, Default)]
pub(crate) struct RecordingStorage {
    pub(crate) inner: MemoryStorage,
    pub(crate) reads: RefCell<Vec<String>>,
    pub(crate) failing: Cell<bool>,
    rejected_key: RefCell<Option<String>>,
}

impl RecordingStorage {
    /// Makes `set` fail for `key` only; reads and removals still succeed.
    pub(crate) fn reject_writes_to(&self, key: &str) {
        *self.rejected_key.borrow_mut() = Some(key.to_string());
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.reads.borrow_mut().push(key.to_string());
        self.check()?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        if self.rejected_key.borrow().as_deref() == Some(key) {
            return Err(StorageError::Unavailable(format!("quota exceeded for {key}")));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove(key)
    }
}

/// Fake transport wired into a fresh client pipeline.
pub(crate) fn api_harness() -> (Rc<FakeTransport>, ApiClient) {
    let transport = Rc::new(FakeTransport::default());
    let api = ApiClient::new(transport.clone(), SessionContext::new());
    (transport, api)
}

/// Like [`api_harness`], plus a recording session store.
pub(crate) fn session_harness() -> (Rc<FakeTransport>, ApiClient, Rc<RecordingStorage>, SessionStore) {
    let (transport, api) = api_harness();
    let storage = Rc::new(RecordingStorage::default());
    let store = SessionStore::new(storage.clone());
    (transport, api, storage, store)
}
