//! Render-side authentication state.
//!
//! Components read the signed-in identity from an [`AuthStateNotifier`]
//! instead of querying the auth client. The notifier is not updated by the
//! client; callers mark it after login and logout, or call
//! [`AuthStateNotifier::sync_with`].

use shared::models::UserInfo;
use std::fmt;
use std::rc::Rc;
use tracing::debug;
use yewdux::{Context, Dispatch, Store};

/// Authentication scheme name attached to every claims set.
pub const AUTHENTICATION_TYPE: &str = "apiauth";

/// Identity claims of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Display name; the email address.
    pub name: String,
    /// Email the session was issued to.
    pub email: String,
    /// Tenant scoping every API call of the session.
    pub tenant_id: String,
    /// Always [`AUTHENTICATION_TYPE`].
    pub authentication_type: &'static str,
}

impl Claims {
    pub fn new(email: &str, tenant_id: &str) -> Self {
        Self {
            name: email.to_string(),
            email: email.to_string(),
            tenant_id: tenant_id.to_string(),
            authentication_type: AUTHENTICATION_TYPE,
        }
    }
}

/// Current claims, `None` while anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Claims of the signed-in user.
    pub claims: Option<Claims>,
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(email: &str, tenant_id: &str) -> Self {
        Self {
            claims: Some(Claims::new(email, tenant_id)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.claims.as_ref().map(|claims| claims.email.as_str())
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.claims.as_ref().map(|claims| claims.tenant_id.as_str())
    }
}

impl Store for AuthState {
    fn new(_cx: &Context) -> Self {
        Self::anonymous()
    }

    // Every mutation is announced, including a repeated logout.
    fn should_notify(&self, _old: &Self) -> bool {
        true
    }
}

/// Keeps a subscription alive; dropping it unsubscribes.
pub struct AuthSubscription {
    _dispatch: Dispatch<AuthState>,
}

impl fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSubscription").finish_non_exhaustive()
    }
}

/// Owner of the [`AuthState`] store within a yewdux context.
#[derive(Clone)]
pub struct AuthStateNotifier {
    cx: Context,
    dispatch: Dispatch<AuthState>,
}

impl fmt::Debug for AuthStateNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStateNotifier")
            .field("state", &self.state())
            .finish()
    }
}

impl Default for AuthStateNotifier {
    fn default() -> Self {
        Self::new(&Context::new())
    }
}

impl AuthStateNotifier {
    pub fn new(cx: &Context) -> Self {
        Self {
            cx: cx.clone(),
            dispatch: Dispatch::new(cx),
        }
    }

    /// Current snapshot. Never touches the network.
    pub fn state(&self) -> Rc<AuthState> {
        self.dispatch.get()
    }

    pub fn mark_authenticated(&self, email: &str, tenant_id: &str) {
        debug!(tenant_id, "auth state: authenticated");
        self.dispatch.set(AuthState::authenticated(email, tenant_id));
    }

    pub fn mark_logged_out(&self) {
        debug!("auth state: anonymous");
        self.dispatch.set(AuthState::anonymous());
    }

    /// Mirrors the auth client's principal.
    pub fn sync_with(&self, user: &UserInfo) {
        if user.is_authenticated {
            self.mark_authenticated(&user.email, &user.tenant_id);
        } else {
            self.mark_logged_out();
        }
    }

    /// Calls `on_change` with the new state after every mutation, synchronously.
    pub fn subscribe<F>(&self, on_change: F) -> AuthSubscription
    where
        F: Fn(Rc<AuthState>) + 'static,
    {
        AuthSubscription {
            _dispatch: Dispatch::new(&self.cx).subscribe(on_change),
        }
    }
}
