//! SQL column types and per-column profiles

use serde::{Deserialize, Serialize};

/// Largest value length, in characters, stored in a `VARCHAR(n)` column
pub const MAX_VARCHAR_LENGTH: usize = 255;
/// Largest value size, in bytes, stored in a `TEXT` column
pub const MAX_TEXT_BYTES: usize = 65_535;
/// Largest value size, in bytes, stored in a `MEDIUMTEXT` column
pub const MAX_MEDIUMTEXT_BYTES: usize = 16_777_215;

/// Inferred MariaDB column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SqlType {
    Boolean,
    Int,
    BigInt,
    Float,
    Double,
    Date,
    DateTime,
    Timestamp,
    Time,
    Year,
    Json,
    Uuid,
    /// Bounded string sized to the longest observed value
    Varchar(usize),
    Text,
    MediumText,
    LongText,
}

impl SqlType {
    /// Pick the textual type able to hold the longest observed value
    ///
    /// `VARCHAR(n)` is sized in characters while the `TEXT` family is
    /// limited in bytes, so both measures of the longest value are needed.
    pub fn text_for_length(max_chars: usize, max_bytes: usize) -> Self {
        if max_chars <= MAX_VARCHAR_LENGTH {
            SqlType::Varchar(max_chars)
        } else if max_bytes <= MAX_TEXT_BYTES {
            SqlType::Text
        } else if max_bytes <= MAX_MEDIUMTEXT_BYTES {
            SqlType::MediumText
        } else {
            SqlType::LongText
        }
    }

    /// Values of this type are written to SQL unquoted
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            SqlType::Boolean | SqlType::Int | SqlType::BigInt | SqlType::Float | SqlType::Double
        )
    }

    /// Values of this type are re-validated against a pattern when encoded
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            SqlType::Date | SqlType::DateTime | SqlType::Timestamp | SqlType::Time | SqlType::Year
        )
    }

    /// Values of this type are written as escaped string literals
    pub fn is_textual(&self) -> bool {
        !self.is_numeric() && !self.is_temporal()
    }
}

impl std::fmt::Display for SqlType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlType::Boolean => write!(f, "BOOLEAN"),
            SqlType::Int => write!(f, "INT"),
            SqlType::BigInt => write!(f, "BIGINT"),
            SqlType::Float => write!(f, "FLOAT"),
            SqlType::Double => write!(f, "DOUBLE"),
            SqlType::Date => write!(f, "DATE"),
            SqlType::DateTime => write!(f, "DATETIME"),
            SqlType::Timestamp => write!(f, "TIMESTAMP"),
            SqlType::Time => write!(f, "TIME"),
            SqlType::Year => write!(f, "YEAR"),
            SqlType::Json => write!(f, "JSON"),
            SqlType::Uuid => write!(f, "UUID"),
            SqlType::Varchar(len) => write!(f, "VARCHAR({})", len),
            SqlType::Text => write!(f, "TEXT"),
            SqlType::MediumText => write!(f, "MEDIUMTEXT"),
            SqlType::LongText => write!(f, "LONGTEXT"),
        }
    }
}

/// Inferred description of one sheet column
///
/// Built once per file by a full scan of the column and never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    /// Sanitized, sheet-unique identifier
    pub name: String,
    /// Header text as it appeared in the sheet
    pub raw_header: String,
    /// Type decided for the whole column
    pub inferred_type: SqlType,
    /// Length in characters of the longest non-blank cell, as written
    pub max_observed_length: usize,
    /// Number of blank or missing cells
    pub null_count: usize,
}

impl ColumnProfile {
    /// Create a profile with no statistics attached
    pub fn new(name: impl Into<String>, raw_header: impl Into<String>, inferred_type: SqlType) -> Self {
        Self {
            name: name.into(),
            raw_header: raw_header.into(),
            inferred_type,
            max_observed_length: 0,
            null_count: 0,
        }
    }

    /// Whether any cell of the column was blank
    pub fn has_nulls(&self) -> bool {
        self.null_count > 0
    }
}
