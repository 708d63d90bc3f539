//! Request pipeline shared by every resource client.
//!
//! Each call resolves to an [`Envelope`]: transport faults become a
//! connection-error envelope and bodies that do not decode become an
//! invalid-response envelope, whatever the HTTP status.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{Envelope, from_str_case_insensitive};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

use super::transport::{ApiReply, ApiRequest, HttpTransport, TransportError};
use crate::session::SessionContext;

/// Transport plus session context; cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn HttpTransport>,
    session: SessionContext,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Pipeline over `transport`, authorizing requests from `session`.
    pub fn new(transport: Rc<dyn HttpTransport>, session: SessionContext) -> Self {
        Self { transport, session }
    }

    /// Session context shared with the other clients of this pipeline.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Sends one request carrying the current bearer token.
    ///
    /// # Errors
    /// Returns the transport's error when no response was obtained.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiReply, TransportError> {
        debug!(method = %method, path, "sending API request");
        let reply = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                body,
                bearer_token: self.session.bearer_token(),
            })
            .await?;
        debug!(status = reply.status, path, "API response received");
        Ok(reply)
    }

    /// GET `path` and decode the envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Envelope<T> {
        self.execute(Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path`.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Envelope<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_json(Method::POST, path, body).await
    }

    /// PUT `body` as JSON to `path`.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Envelope<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_json(Method::PUT, path, body).await
    }

    /// PATCH `body` as JSON to `path`.
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Envelope<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute_json(Method::PATCH, path, body).await
    }

    /// PATCH without a request body.
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Envelope<T> {
        self.execute(Method::PATCH, path, None).await
    }

    /// DELETE `path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Envelope<T> {
        self.execute(Method::DELETE, path, None).await
    }

    async fn execute_json<T, B>(&self, method: Method, path: &str, body: &B) -> Envelope<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match encode_body(body) {
            Ok(value) => self.execute(method, path, Some(value)).await,
            Err(err) => connection_failure(path, &err),
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Envelope<T> {
        match self.send(method, path, body).await {
            Ok(reply) => decode_envelope(path, &reply.body),
            Err(err) => connection_failure(path, &err),
        }
    }
}

/// Serializes a request body.
///
/// # Errors
/// Returns [`TransportError::Encode`] when serialization fails.
pub fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(body)?)
}

/// Decodes a body as an envelope, `None` for empty, malformed or `null` bodies.
pub fn try_decode<T: DeserializeOwned>(body: &str) -> Option<Envelope<T>> {
    match from_str_case_insensitive::<Option<Envelope<T>>>(body) {
        Ok(envelope) => envelope,
        Err(err) => {
            debug!(error = %err, "response body is not an envelope");
            None
        }
    }
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(path: &str, body: &str) -> Envelope<T> {
    try_decode(body).unwrap_or_else(|| {
        warn!(path, "undecodable API response");
        Envelope::invalid_response()
    })
}

pub(crate) fn connection_failure<T>(path: &str, err: &TransportError) -> Envelope<T> {
    warn!(path, error = %err, "API request failed");
    Envelope::connection_error(err.to_string())
}

/// `path?includeDeleted=true|false`.
pub(crate) fn with_include_deleted(path: &str, include_deleted: bool) -> String {
    format!("{path}?includeDeleted={include_deleted}")
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::api_harness;
    use shared::models::{CONNECTION_ERROR_MESSAGE, INVALID_RESPONSE_MESSAGE, NoContent};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_transport_failure_becomes_connection_error() {
        let (transport, api) = api_harness();
        transport.fail("connection refused");

        let envelope: Envelope<Vec<i32>> = api.get("api/pessoa").await;
        assert!(!envelope.success);
        assert_eq!(envelope.message, CONNECTION_ERROR_MESSAGE);
        assert_eq!(envelope.errors, vec!["connection refused".to_string()]);
        assert!(envelope.data.is_none());
    }

    /// Unparseable bodies yield the invalid-response fallback for any status
    #[tokio::test]
    async fn test_undecodable_bodies_become_invalid_response() {
        let (transport, api) = api_harness();
        for (status, body) in [(200, ""), (200, "<html>oops</html>"), (500, "null"), (404, "")] {
            transport.reply(status, body);
            let envelope: Envelope<NoContent> = api.get("api/tarefa/1").await;
            assert!(!envelope.success, "{status} {body:?}");
            assert_eq!(envelope.message, INVALID_RESPONSE_MESSAGE);
            assert!(envelope.errors.is_empty());
        }
    }

    /// A well-formed failure envelope on an error status is passed through
    #[tokio::test]
    async fn test_error_status_envelope_passes_through() {
        let (transport, api) = api_harness();
        transport.reply(
            400,
            r#"{"Success":false,"Message":"Dados inválidos","Errors":["Nome é obrigatório"]}"#,
        );

        let envelope: Envelope<NoContent> = api.post("api/pessoa", &BTreeMap::<String, String>::new()).await;
        assert!(!envelope.success);
        assert_eq!(envelope.message, "Dados inválidos");
        assert_eq!(envelope.errors, vec!["Nome é obrigatório".to_string()]);
    }

    #[tokio::test]
    async fn test_bearer_token_and_body_are_attached() {
        let (transport, api) = api_harness();
        api.session().set_bearer_token(Some("tok".to_string()));
        transport.reply(200, r#"{"success":true,"data":7}"#);

        let envelope: Envelope<i32> = api.put("api/tarefa/7", &serde_json::json!({"titulo": "x"})).await;
        assert_eq!(envelope.into_data(), Some(7));

        let request = transport.last_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "api/tarefa/7");
        assert_eq!(request.bearer_token.as_deref(), Some("tok"));
        assert_eq!(request.body, Some(serde_json::json!({"titulo": "x"})));
    }

    #[tokio::test]
    async fn test_patch_empty_sends_no_body() {
        let (transport, api) = api_harness();
        transport.reply(200, r#"{"success":true}"#);

        let envelope: Envelope<NoContent> = api.patch_empty("api/tarefa/2/concluir").await;
        assert!(envelope.success);
        let request = transport.last_request();
        assert_eq!(request.method, Method::PATCH);
        assert!(request.body.is_none());
        assert!(request.bearer_token.is_none());
    }

    #[test]
    fn test_include_deleted_renders_lowercase() {
        assert_eq!(with_include_deleted("api/pessoa", false), "api/pessoa?includeDeleted=false");
        assert_eq!(with_include_deleted("api/tarefa", true), "api/tarefa?includeDeleted=true");
    }

    #[test]
    fn test_try_decode_null_and_empty() {
        assert!(try_decode::<NoContent>("null").is_none());
        assert!(try_decode::<NoContent>("").is_none());
        assert!(try_decode::<NoContent>("{}").is_some());
    }
}
