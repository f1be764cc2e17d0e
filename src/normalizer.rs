//! Coercion of builder arguments into the service's wire formats.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::error::{QueryError, Result};

/// Wire format for date-times sent to the query endpoint
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const MIDNIGHT_SUFFIX: &str = "T00:00:00";

/// Cached regex for the calendar-date string form
static CALENDAR_DATE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_calendar_date_regex() -> &'static Regex {
    CALENDAR_DATE_REGEX.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Failed to compile calendar date regex")
    })
}

/// A loosely-typed builder argument.
///
/// Builder methods accept anything convertible into this, and each method
/// decides which kinds it will take.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Text(String),
    DateTime(NaiveDateTime),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl InputValue {
    /// Name of the value's kind, used in type errors
    pub fn kind(&self) -> &'static str {
        match self {
            InputValue::Text(_) => "string",
            InputValue::DateTime(_) => "datetime",
            InputValue::Integer(_) => "integer",
            InputValue::Float(_) => "float",
            InputValue::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Text(s) => write!(f, "{}", s),
            InputValue::DateTime(dt) => write!(f, "{}", dt.format(WIRE_DATE_FORMAT)),
            InputValue::Integer(i) => write!(f, "{}", i),
            InputValue::Float(x) => write!(f, "{}", x),
            InputValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl From<&String> for InputValue {
    fn from(value: &String) -> Self {
        InputValue::Text(value.clone())
    }
}

impl From<NaiveDateTime> for InputValue {
    fn from(value: NaiveDateTime) -> Self {
        InputValue::DateTime(value)
    }
}

/// A calendar date is a date-time at midnight
impl From<NaiveDate> for InputValue {
    fn from(value: NaiveDate) -> Self {
        InputValue::DateTime(value.and_time(chrono::NaiveTime::MIN))
    }
}

/// Zoned date-times are converted to UTC
impl<Tz: TimeZone> From<DateTime<Tz>> for InputValue {
    fn from(value: DateTime<Tz>) -> Self {
        InputValue::DateTime(value.naive_utc())
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Integer(value)
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Integer(i64::from(value))
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Float(value)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Boolean(value)
    }
}

/// Render a date-like value in the query endpoint's wire format.
///
/// Date-times become `YYYY-MM-DDTHH:MM:SS`. Strings must be calendar dates
/// (`YYYY-MM-DD`) and are returned unchanged once validated.
pub fn to_wire_date(value: &InputValue) -> Result<String> {
    match value {
        InputValue::DateTime(dt) => Ok(dt.format(WIRE_DATE_FORMAT).to_string()),
        InputValue::Text(text) => {
            validate_calendar_date(text)?;
            Ok(text.clone())
        }
        other => Err(QueryError::invalid_input_type(
            other.to_string(),
            "a datetime or a string in format YYYY-MM-DD",
        )),
    }
}

fn validate_calendar_date(text: &str) -> Result<()> {
    let invalid = || QueryError::InvalidDate {
        value: text.to_string(),
    };

    if !get_calendar_date_regex().is_match(text) {
        return Err(invalid());
    }

    let at_midnight = format!("{}{}", text, MIDNIGHT_SUFFIX);
    NaiveDateTime::parse_from_str(&at_midnight, WIRE_DATE_FORMAT).map_err(|_| invalid())?;
    Ok(())
}
