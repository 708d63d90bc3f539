#![forbid(unsafe_code)]

//! Browser-side client for the Ibnelve people and task API.
//!
//! [`Services`] wires one transport and one session into the auth, people
//! and task clients. Render state lives separately in
//! [`auth_state::AuthStateNotifier`].

pub mod api;
pub mod auth_state;
pub mod session;
pub mod storage;

use shared::config::ClientConfig;
use std::rc::Rc;

use api::{ApiClient, AuthClient, HttpTransport, PeopleClient, ReqwestTransport, TaskClient, TransportError};
use auth_state::AuthStateNotifier;
use session::{SessionContext, SessionStore};
use storage::KeyValueStore;

/// Every client of one signed-in browser tab.
#[derive(Clone, Debug)]
pub struct Services {
    /// Login, registration and the stored session.
    pub auth: AuthClient,
    /// People (`api/pessoa`) endpoints.
    pub people: PeopleClient,
    /// Task (`api/tarefa`) endpoints.
    pub tasks: TaskClient,
    /// Authentication state observed by rendering code.
    pub auth_state: AuthStateNotifier,
}

impl Services {
    /// Builds the clients over a `reqwest` transport rooted at the configured address.
    ///
    /// # Errors
    /// Returns [`TransportError::Config`] when the base address is invalid.
    pub fn new(config: &ClientConfig, storage: Rc<dyn KeyValueStore>) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::from_config(config)?;
        tracing::debug!(base_url = %transport.base_url(), "API clients configured");
        Ok(Self::with_transport(Rc::new(transport), storage))
    }

    /// Builds the clients over any transport.
    pub fn with_transport(transport: Rc<dyn HttpTransport>, storage: Rc<dyn KeyValueStore>) -> Self {
        let api = ApiClient::new(transport, SessionContext::new());
        Self {
            auth: AuthClient::new(api.clone(), SessionStore::new(storage)),
            people: PeopleClient::new(api.clone()),
            tasks: TaskClient::new(api),
            auth_state: AuthStateNotifier::default(),
        }
    }

    /// Clients for the running page: build-time API address, `localStorage` session.
    ///
    /// # Errors
    /// Returns [`TransportError::Config`] when the baked-in address is invalid.
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Result<Self, TransportError> {
        Self::new(
            &ClientConfig::from_build_env(),
            Rc::new(storage::LocalStorageBackend),
        )
    }
}
