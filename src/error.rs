use thiserror::Error;

/// Main library error type covering schema discovery and query validation
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Schema fetch failed: {url} - {source}")]
    SchemaFetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Schema parsing error: {details}")]
    SchemaParse { details: String },

    #[error("Unknown parameter: {name} must be one of the following values: {}", valid.join(", "))]
    UnknownParameter { name: String, valid: Vec<String> },

    #[error("Invalid input type: {value} must be {expected}")]
    InvalidInputType { value: String, expected: String },

    #[error("Invalid date: '{value}' must be in format YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid format: '{value}' must be one of these values: {}", accepted.join(", "))]
    InvalidFormat {
        value: String,
        accepted: Vec<String>,
    },

    #[error("Invalid URL: {url} - {details}")]
    InvalidUrl { url: String, details: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl QueryError {
    pub fn schema_parse(details: impl Into<String>) -> Self {
        Self::SchemaParse {
            details: details.into(),
        }
    }

    pub fn invalid_input_type(value: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidInputType {
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// True for errors raised by local argument validation, before any I/O
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QueryError::UnknownParameter { .. }
                | QueryError::InvalidInputType { .. }
                | QueryError::InvalidDate { .. }
                | QueryError::InvalidFormat { .. }
        )
    }
}

impl From<quick_xml::Error> for QueryError {
    fn from(err: quick_xml::Error) -> Self {
        QueryError::schema_parse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, QueryError>;
