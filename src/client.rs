//! The query client: schema-aware builder plus request execution.

use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use url::Url;

use crate::error::{QueryError, Result};
use crate::http_client::{HttpClientConfig, HttpTransport, Transport};
use crate::normalizer::{InputValue, to_wire_date};
use crate::registry::{ParameterDefinition, ParameterRegistry};
use crate::schema_loader::SchemaLoader;

/// Default base URL of the FDSN event service
pub const DEFAULT_BASE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/";

/// Response formats accepted by `format`
pub const ACCEPTED_FORMATS: [&str; 6] = ["csv", "geojson", "kml", "quakeml", "text", "xml"];

/// Format always sent by [`QuakeQuery::execute`]
pub const FORCED_FORMAT: &str = "geojson";

pub const FORMAT_KEY: &str = "format";
pub const STARTTIME_KEY: &str = "starttime";
pub const ENDTIME_KEY: &str = "endtime";
pub const UPDATEDAFTER_KEY: &str = "updatedafter";

/// Service methods exposed under the base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Event search
    Query,
    /// Schema document describing the query parameters
    ApplicationWadl,
}

impl Endpoint {
    pub fn method(&self) -> &'static str {
        match self {
            Endpoint::Query => "query",
            Endpoint::ApplicationWadl => "application.wadl",
        }
    }

    /// Resolve this endpoint against a base URL ending in `/`
    pub fn url(&self, base: &Url) -> Result<Url> {
        base.join(self.method())
            .map_err(|err| QueryError::InvalidUrl {
                url: base.to_string(),
                details: err.to_string(),
            })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method())
    }
}

/// Schema-aware client for the event search service.
///
/// Construction fetches the schema document once. Builder methods validate
/// their arguments before touching the query state, so a failed call leaves
/// the query unchanged.
pub struct QuakeQuery<T: Transport = HttpTransport> {
    transport: T,
    registry: ParameterRegistry,
    query: BTreeMap<String, String>,
    query_url: Url,
}

impl QuakeQuery<HttpTransport> {
    /// Connect to the default service endpoint
    pub fn new() -> Result<Self> {
        Self::with_http_config(DEFAULT_BASE_URL, HttpClientConfig::default())
    }

    /// Connect to a service rooted at `base_url` using a fresh HTTP session
    pub fn with_http_config(base_url: &str, config: HttpClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(transport, base_url)
    }
}

impl<T: Transport> QuakeQuery<T> {
    /// Build a client over an arbitrary transport, discovering the schema
    /// from `{base_url}application.wadl`
    pub fn with_transport(transport: T, base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|err| QueryError::InvalidUrl {
            url: base_url.to_string(),
            details: err.to_string(),
        })?;
        let schema_url = Endpoint::ApplicationWadl.url(&base)?;
        let query_url = Endpoint::Query.url(&base)?;

        let registry = SchemaLoader::new(&transport).load(&schema_url)?;

        Ok(Self {
            transport,
            registry,
            query: BTreeMap::new(),
            query_url,
        })
    }

    /// Known parameter names, in schema order
    pub fn params(&self) -> &[String] {
        self.registry.names()
    }

    /// Definition of a single parameter
    pub fn describe(&self, name: &str) -> Result<&ParameterDefinition> {
        self.registry.describe(name)
    }

    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }

    /// Query state accumulated so far
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Set the response format.
    ///
    /// Note that [`execute`](Self::execute) always sends `format=geojson`,
    /// replacing whatever was set here.
    pub fn set_format(&mut self, fmt: impl Into<InputValue>) -> Result<&mut Self> {
        let fmt = match fmt.into() {
            InputValue::Text(text) => text,
            other => {
                debug!(kind = other.kind(), "rejected format argument");
                return Err(QueryError::invalid_input_type(
                    other.to_string(),
                    "type string",
                ));
            }
        };

        if !ACCEPTED_FORMATS.contains(&fmt.as_str()) {
            debug!(format = %fmt, "rejected format value");
            return Err(QueryError::InvalidFormat {
                value: fmt,
                accepted: ACCEPTED_FORMATS.iter().map(|s| s.to_string()).collect(),
            });
        }

        self.query.insert(FORMAT_KEY.to_string(), fmt);
        Ok(self)
    }

    /// Limit events to those occurring on or after `start` and, when `end` is
    /// given, on or before `end`. Without `end` the service defaults to now.
    pub fn occur_between(
        &mut self,
        start: impl Into<InputValue>,
        end: Option<impl Into<InputValue>>,
    ) -> Result<&mut Self> {
        let start = to_wire_date(&start.into())?;
        let end = end.map(|end| to_wire_date(&end.into())).transpose()?;

        self.query.insert(STARTTIME_KEY.to_string(), start);
        if let Some(end) = end {
            self.query.insert(ENDTIME_KEY.to_string(), end);
        }
        Ok(self)
    }

    /// Limit events to those updated after `value`
    pub fn updated_after(&mut self, value: impl Into<InputValue>) -> Result<&mut Self> {
        let value = to_wire_date(&value.into())?;
        self.query.insert(UPDATEDAFTER_KEY.to_string(), value);
        Ok(self)
    }

    /// URL that [`execute`](Self::execute) would request for the current state
    pub fn request_url(&self) -> Url {
        let mut params = self.query.clone();
        params.insert(FORMAT_KEY.to_string(), FORCED_FORMAT.to_string());
        Self::encode(&self.query_url, &params)
    }

    /// Send the search request and return the transport's response unaltered.
    ///
    /// The `format` key is overwritten with `geojson` first. Transport errors
    /// are returned as-is.
    pub fn execute(&mut self) -> std::result::Result<T::Response, T::Error> {
        self.query
            .insert(FORMAT_KEY.to_string(), FORCED_FORMAT.to_string());
        let url = Self::encode(&self.query_url, &self.query);
        debug!(%url, "executing query");
        self.transport.get(&url)
    }

    fn encode(base: &Url, params: &BTreeMap<String, String>) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut().clear().extend_pairs(params.iter());
        url
    }
}
