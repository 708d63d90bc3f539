//! Clients for the Ibnelve REST API.
//!
//! Every operation resolves to an [`Envelope`](shared::models::Envelope);
//! faults never escape as errors.

pub mod auth;
pub mod client;
pub mod people;
pub mod tasks;
pub mod transport;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub(crate) mod test_support;

pub use auth::AuthClient;
pub use client::ApiClient;
pub use people::PeopleClient;
pub use tasks::TaskClient;
pub use transport::{ApiReply, ApiRequest, HttpTransport, ReqwestTransport, TransportError};
