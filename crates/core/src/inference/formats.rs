//! Pattern checks for string values
//!
//! These are purely syntactic: `2020-02-30` is a date and `{not json}` is
//! JSON as far as these checks are concerned.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::SqlType;

/// Value shape recognised during type inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:MM:SS`
    DateTime,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    Timestamp,
    /// `HH:MM:SS`
    Time,
    /// `YYYY`
    Year,
    /// Wrapped in `{...}`
    Json,
    /// Canonical 8-4-4-4-12 hex UUID
    Uuid,
}

impl Format {
    /// Formats in inference precedence order
    pub const PRECEDENCE: [Format; 7] = [
        Format::Date,
        Format::DateTime,
        Format::Timestamp,
        Format::Time,
        Format::Year,
        Format::Json,
        Format::Uuid,
    ];

    /// Check a trimmed value against this format
    pub fn matches(&self, value: &str) -> bool {
        self.regex().is_match(value)
    }

    /// Column type chosen when every value of a column has this format
    pub fn sql_type(&self) -> SqlType {
        match self {
            Format::Date => SqlType::Date,
            Format::DateTime => SqlType::DateTime,
            Format::Timestamp => SqlType::Timestamp,
            Format::Time => SqlType::Time,
            Format::Year => SqlType::Year,
            Format::Json => SqlType::Json,
            Format::Uuid => SqlType::Uuid,
        }
    }

    /// The format a temporal column's values must keep
    pub fn for_temporal(sql_type: &SqlType) -> Option<Format> {
        match sql_type {
            SqlType::Date => Some(Format::Date),
            SqlType::DateTime => Some(Format::DateTime),
            SqlType::Timestamp => Some(Format::Timestamp),
            SqlType::Time => Some(Format::Time),
            SqlType::Year => Some(Format::Year),
            _ => None,
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Format::Date => &DATE_REGEX,
            Format::DateTime => &DATETIME_REGEX,
            Format::Timestamp => &TIMESTAMP_REGEX,
            Format::Time => &TIME_REGEX,
            Format::Year => &YEAR_REGEX,
            Format::Json => &JSON_REGEX,
            Format::Uuid => &UUID_REGEX,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Date => write!(f, "date"),
            Format::DateTime => write!(f, "date-time"),
            Format::Timestamp => write!(f, "timestamp"),
            Format::Time => write!(f, "time"),
            Format::Year => write!(f, "year"),
            Format::Json => write!(f, "json"),
            Format::Uuid => write!(f, "uuid"),
        }
    }
}

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static DATETIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap());

static TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap());

static TIME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}:\d{2}$").unwrap());

static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

// `(?s)` lets a multi-line cell still count as wrapped in braces
static JSON_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^\{.*\}$").unwrap());

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

/// Tokens accepted in a BOOLEAN column
pub const BOOLEAN_TOKENS: [&str; 4] = ["true", "false", "1", "0"];

/// Whether a trimmed value is one of the boolean tokens
pub fn is_boolean_token(value: &str) -> bool {
    BOOLEAN_TOKENS.contains(&value)
}

/// Whether a trimmed value is a temporal literal acceptable for `sql_type`
///
/// Non-temporal types never match.
pub fn matches_temporal(value: &str, sql_type: &SqlType) -> bool {
    Format::for_temporal(sql_type)
        .map(|format| format.matches(value))
        .unwrap_or(false)
}
