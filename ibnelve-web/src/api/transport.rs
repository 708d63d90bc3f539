use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use shared::config::{ClientConfig, ConfigError};
use url::Url;

/// Faults raised before a response body is available.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured base address is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request path could not be resolved against the base address.
    #[error("invalid request path {path:?}: {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Connection-level failure reported by a transport without a richer error type.
    #[error("{0}")]
    Network(String),
}

/// One outgoing API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, query string included.
    pub path: String,
    pub body: Option<Value>,
    pub bearer_token: Option<String>,
}

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the API. Futures are not `Send`, as in the browser.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Performs the exchange and returns the status and full body text,
    /// whatever the status code.
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError>;
}

/// [`HttpTransport`] backed by `reqwest` (browser `fetch` on wasm32).
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    base_url: Url,
    client: Client,
}

impl ReqwestTransport {
    /// Transport rooted at `base_url`, which should end with `/`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// # Errors
    /// Returns [`TransportError::Config`] when the configured address is invalid.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(config.base_url()?))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| TransportError::InvalidUrl {
                path: path.to_string(),
                source,
            })
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiReply, TransportError> {
        let url = self.api_url(&request.path)?;
        let mut builder = self.client.request(request.method, url);
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiReply { status, body })
    }
}
