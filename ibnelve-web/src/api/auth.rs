use reqwest::Method;
use shared::models::{
    AUTHENTICATION_ERROR_MESSAGE, Envelope, LoginRequest, LoginResponse, NoContent,
    RegisterRequest, UserInfo,
};
use tracing::{debug, warn};

use super::client::{ApiClient, connection_failure, encode_body, try_decode};
use crate::session::SessionStore;
use crate::storage::StorageError;

const LOGIN_PATH: &str = "api/auth/login";
const REGISTER_PATH: &str = "api/auth/register";

/// Login, registration and the locally cached identity.
#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
    store: SessionStore,
}

impl AuthClient {
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Posts credentials; on an accepted login persists the session, sets the
    /// bearer token and marks the principal authenticated.
    ///
    /// Rejections are returned as the server sent them. Nothing local changes
    /// unless the envelope reports success with a payload.
    pub async fn login(&self, request: &LoginRequest) -> Envelope<LoginResponse> {
        let body = match encode_body(request) {
            Ok(body) => body,
            Err(err) => return connection_failure(LOGIN_PATH, &err),
        };
        let reply = match self.api.send(Method::POST, LOGIN_PATH, Some(body)).await {
            Ok(reply) => reply,
            Err(err) => return connection_failure(LOGIN_PATH, &err),
        };

        if !reply.is_success() {
            debug!(status = reply.status, "login rejected");
            return try_decode(&reply.body).unwrap_or_else(|| {
                warn!(status = reply.status, "undecodable login rejection");
                Envelope::failure(AUTHENTICATION_ERROR_MESSAGE, Vec::new())
            });
        }

        let Some(envelope) = try_decode::<LoginResponse>(&reply.body) else {
            warn!("undecodable login response");
            return Envelope::invalid_response();
        };

        if envelope.success
            && let Some(session) = &envelope.data
            && let Err(err) = self.establish(session)
        {
            warn!(error = %err, "failed to persist session");
            return Envelope::connection_error(err.to_string());
        }
        envelope
    }

    fn establish(&self, session: &LoginResponse) -> Result<(), StorageError> {
        self.store
            .persist(&session.token, &session.email, &session.tenant_id)?;
        let context = self.api.session();
        context.set_bearer_token(Some(session.token.clone()));
        context.set_principal(UserInfo::authenticated(
            session.email.clone(),
            session.tenant_id.clone(),
        ));
        debug!(tenant_id = %session.tenant_id, "signed in");
        Ok(())
    }

    /// Creates an account. The envelope is returned as received.
    pub async fn register(&self, request: &RegisterRequest) -> Envelope<NoContent> {
        self.api.post(REGISTER_PATH, request).await
    }

    /// Forgets the session locally. Never fails and sends nothing.
    pub fn logout(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear stored session");
        }
        self.api.session().reset();
        debug!("signed out");
    }

    /// Cached principal, rehydrated from storage after a page reload.
    pub fn current_user(&self) -> UserInfo {
        let context = self.api.session();
        let principal = context.principal();
        if principal.is_authenticated {
            return principal;
        }

        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "session storage unavailable");
                return principal;
            }
        };
        let Some(token) = stored.token.filter(|token| !token.is_empty()) else {
            return principal;
        };

        let principal = UserInfo::authenticated(
            stored.email.unwrap_or_default(),
            stored.tenant_id.unwrap_or_default(),
        );
        context.set_principal(principal.clone());
        context.set_bearer_token(Some(token));
        debug!(tenant_id = %principal.tenant_id, "session restored from storage");
        principal
    }

    /// True when a token is stored. The token is not checked with the server.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Stored token; storage failures and empty values read as `None`.
    pub fn token(&self) -> Option<String> {
        let token = read_or_empty(self.store.token());
        (!token.is_empty()).then_some(token)
    }
}

fn read_or_empty(read: Result<Option<String>, StorageError>) -> String {
    match read {
        Ok(value) => value.unwrap_or_default(),
        Err(err) => {
            warn!(error = %err, "session storage unavailable");
            String::new()
        }
    }
}
