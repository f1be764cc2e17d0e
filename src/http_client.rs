use reqwest::blocking::{Client, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::QueryError;

/// Seam between the query client and the network.
///
/// `fetch_text` is used once for schema discovery; `get` issues the search
/// request and hands back the raw response.
#[cfg_attr(test, mockall::automock(type Response = String; type Error = std::io::Error;))]
pub trait Transport {
    type Response;
    type Error: std::error::Error + Send + Sync + 'static;

    /// GET `url` and return the response body as text
    fn fetch_text(&self, url: &Url) -> Result<String, Self::Error>;

    /// GET `url` and return the response unaltered
    fn get(&self, url: &Url) -> Result<Self::Response, Self::Error>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("quakequery/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blocking HTTP transport backed by a single reqwest session
pub struct HttpTransport {
    client: Client,
    config: HttpClientConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .map_err(QueryError::from)?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    type Response = Response;
    type Error = reqwest::Error;

    fn fetch_text(&self, url: &Url) -> Result<String, Self::Error> {
        debug!(%url, "fetching document");
        self.client
            .get(url.clone())
            .send()?
            .error_for_status()?
            .text()
    }

    fn get(&self, url: &Url) -> Result<Self::Response, Self::Error> {
        debug!(%url, "sending request");
        self.client.get(url.clone()).send()
    }
}
