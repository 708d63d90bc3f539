//! Persisted session data and the in-memory authentication context.

use shared::models::UserInfo;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key of the signed-in email.
pub const EMAIL_KEY: &str = "userEmail";
/// Storage key of the signed-in tenant.
pub const TENANT_KEY: &str = "tenantId";

/// Snapshot of the three persisted session entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Bearer token issued at login.
    pub token: Option<String>,
    /// Email of the signed-in user.
    pub email: Option<String>,
    /// Tenant the token was issued for.
    pub tenant_id: Option<String>,
}

/// Typed access to the session entries of a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// # Errors
    /// Propagates backend failures.
    pub fn token(&self) -> Result<Option<String>, StorageError> {
        self.backend.get(TOKEN_KEY)
    }

    /// # Errors
    /// Propagates backend failures.
    pub fn email(&self) -> Result<Option<String>, StorageError> {
        self.backend.get(EMAIL_KEY)
    }

    /// # Errors
    /// Propagates backend failures.
    pub fn tenant_id(&self) -> Result<Option<String>, StorageError> {
        self.backend.get(TENANT_KEY)
    }

    /// Reads all three entries.
    ///
    /// # Errors
    /// Propagates the first backend failure.
    pub fn load(&self) -> Result<Session, StorageError> {
        Ok(Session {
            token: self.token()?,
            email: self.email()?,
            tenant_id: self.tenant_id()?,
        })
    }

    /// Writes the entries issued by a successful login. A failed write
    /// removes whatever was already written, so a token never outlives its
    /// email and tenant.
    ///
    /// # Errors
    /// Returns the failed write's error after the rollback.
    pub fn persist(&self, token: &str, email: &str, tenant_id: &str) -> Result<(), StorageError> {
        let written = self
            .backend
            .set(TOKEN_KEY, token)
            .and_then(|()| self.backend.set(EMAIL_KEY, email))
            .and_then(|()| self.backend.set(TENANT_KEY, tenant_id));

        if let Err(err) = written {
            if let Err(cleanup) = self.clear() {
                warn!(error = %cleanup, "failed to roll back partial session");
            }
            return Err(err);
        }
        debug!(tenant_id, "session persisted");
        Ok(())
    }

    /// Removes every entry, attempting all three even after a failure.
    ///
    /// # Errors
    /// Returns the first failure encountered.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in [TOKEN_KEY, EMAIL_KEY, TENANT_KEY] {
            if let Err(err) = self.backend.remove(key) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[derive(Debug, Default)]
struct SessionState {
    bearer_token: Option<String>,
    principal: UserInfo,
}

/// Bearer token and cached principal shared by every client built on one
/// transport.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    state: Arc<Mutex<SessionState>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token attached as `Authorization: Bearer` to outgoing requests.
    pub fn bearer_token(&self) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.bearer_token.clone())
    }

    pub fn set_bearer_token(&self, token: Option<String>) {
        if let Ok(mut state) = self.state.lock() {
            state.bearer_token = token;
        }
    }

    /// Cached principal; anonymous until a login or rehydration.
    pub fn principal(&self) -> UserInfo {
        self.state
            .lock()
            .map(|state| state.principal.clone())
            .unwrap_or_default()
    }

    pub fn set_principal(&self, principal: UserInfo) {
        if let Ok(mut state) = self.state.lock() {
            state.principal = principal;
        }
    }

    /// Drops the bearer token and resets the principal to anonymous.
    pub fn reset(&self) {
        if let Ok(mut state) = self.state.lock() {
            *state = SessionState::default();
        }
    }
}
