//! # quakequery Library
//!
//! A client for the USGS FDSN earthquake event service. The service's accepted
//! query parameters are discovered from its WADL schema document, and a fluent
//! builder validates dates and formats before a search request is sent.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http_client;
pub mod normalizer;
pub mod output;
pub mod registry;
pub mod schema_loader;

pub use cli::{Cli, OutputFormat, ResponseFormat, VerbosityLevel};
pub use client::{ACCEPTED_FORMATS, DEFAULT_BASE_URL, Endpoint, QuakeQuery};
pub use config::{Config, ConfigError, ConfigManager, EnvProvider};
pub use error::{QueryError, Result};
pub use http_client::{HttpClientConfig, HttpTransport, Transport};
pub use normalizer::{InputValue, to_wire_date};
pub use output::Output;
pub use registry::{DEFAULT_DATA_TYPE, ParameterDefinition, ParameterRegistry};
pub use schema_loader::{SchemaLoader, WADL_NAMESPACE, parse_schema};
