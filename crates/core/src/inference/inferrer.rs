//! Column type inference
//!
//! Inference is a best-effort heuristic: a column is assigned the most
//! specific type that every one of its non-blank values satisfies. The
//! candidate types are tried in a fixed precedence order and a single
//! non-conforming value rules a candidate out for the whole column.

use serde::{Deserialize, Serialize};

use super::formats::{Format, is_boolean_token};
use super::types::{ColumnProfile, SqlType};
use crate::sql::identifier::ColumnNamer;

/// Maximum decimal length of a value that may still fit a 32-bit INT
const INT_MAX_DIGITS: usize = 10;
/// Longest value that keeps a decimal column in single precision
const FLOAT_MAX_LENGTH: usize = 7;

/// Counters gathered while scanning a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    /// Non-blank values observed
    pub values: usize,
    /// Blank or whitespace-only values observed
    pub nulls: usize,
    /// Length in characters of the longest trimmed non-blank value
    pub max_length: usize,
    /// Length in characters of the longest non-blank cell as written
    pub max_cell_chars: usize,
    /// Size in bytes of the longest non-blank cell as written
    pub max_cell_bytes: usize,
}

/// Incremental type inference for a single column
///
/// Feed every cell of the column through [`observe`](Self::observe), then
/// call [`finish`](Self::finish) for the decided type.
#[derive(Debug, Clone)]
pub struct ColumnTypeInferrer {
    is_boolean: bool,
    is_int: bool,
    needs_bigint: bool,
    is_decimal: bool,
    /// One flag per entry of [`Format::PRECEDENCE`]
    formats: [bool; Format::PRECEDENCE.len()],
    stats: ColumnStats,
}

impl Default for ColumnTypeInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnTypeInferrer {
    /// Create an inferrer that has seen no values
    pub fn new() -> Self {
        Self {
            is_boolean: true,
            is_int: true,
            needs_bigint: false,
            is_decimal: true,
            formats: [true; Format::PRECEDENCE.len()],
            stats: ColumnStats::default(),
        }
    }

    /// Record one raw cell value
    pub fn observe(&mut self, raw: &str) {
        let value = raw.trim();
        if value.is_empty() {
            self.stats.nulls += 1;
            return;
        }

        self.stats.values += 1;
        let length = value.chars().count();
        self.stats.max_length = self.stats.max_length.max(length);
        // The fallback type must hold the untrimmed cell that gets written
        self.stats.max_cell_chars = self.stats.max_cell_chars.max(raw.chars().count());
        self.stats.max_cell_bytes = self.stats.max_cell_bytes.max(raw.len());

        if self.is_boolean && !is_boolean_token(value) {
            self.is_boolean = false;
        }

        if self.is_int {
            match value.parse::<i64>() {
                Ok(n) => {
                    if length > INT_MAX_DIGITS
                        || (length == INT_MAX_DIGITS && n > i64::from(i32::MAX))
                    {
                        self.needs_bigint = true;
                    }
                }
                Err(_) => self.is_int = false,
            }
        }

        if self.is_decimal && !value.parse::<f64>().is_ok_and(f64::is_finite) {
            self.is_decimal = false;
        }

        for (flag, format) in self.formats.iter_mut().zip(Format::PRECEDENCE) {
            if *flag && !format.matches(value) {
                *flag = false;
            }
        }
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> ColumnStats {
        self.stats
    }

    /// Decide the column type from everything observed
    pub fn finish(&self) -> SqlType {
        if self.is_boolean {
            return SqlType::Boolean;
        }
        if self.is_int {
            return if self.needs_bigint {
                SqlType::BigInt
            } else {
                SqlType::Int
            };
        }
        if self.is_decimal {
            return if self.stats.max_length <= FLOAT_MAX_LENGTH {
                SqlType::Float
            } else {
                SqlType::Double
            };
        }
        if let Some(format) = self
            .formats
            .iter()
            .zip(Format::PRECEDENCE)
            .find_map(|(matched, format)| matched.then_some(format))
        {
            return format.sql_type();
        }
        SqlType::text_for_length(self.stats.max_cell_chars, self.stats.max_cell_bytes)
    }
}

/// Infer the type of a column from its raw values
///
/// Blank values do not take part in the decision. A column with no
/// non-blank values satisfies every rule and is therefore BOOLEAN.
pub fn infer_column_type<I, S>(values: I) -> SqlType
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut inferrer = ColumnTypeInferrer::new();
    for value in values {
        inferrer.observe(value.as_ref());
    }
    inferrer.finish()
}

/// Build the column profiles of a sheet by scanning every data row
///
/// Cells missing from short rows count as blanks; cells beyond the header
/// width are ignored here and handled when rendering inserts.
pub fn profile_columns(header: &[String], rows: &[Vec<String>]) -> Vec<ColumnProfile> {
    let mut inferrers = vec![ColumnTypeInferrer::new(); header.len()];

    for row in rows {
        for (index, inferrer) in inferrers.iter_mut().enumerate() {
            inferrer.observe(row.get(index).map(String::as_str).unwrap_or(""));
        }
    }

    let mut namer = ColumnNamer::new();
    header
        .iter()
        .zip(inferrers)
        .enumerate()
        .map(|(index, (raw_header, inferrer))| {
            let stats = inferrer.stats();
            ColumnProfile {
                name: namer.name_for(raw_header, index),
                raw_header: raw_header.clone(),
                inferred_type: inferrer.finish(),
                max_observed_length: stats.max_cell_chars,
                null_count: stats.nulls,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_one_column_is_boolean_not_int() {
        assert_eq!(infer_column_type(["1", "0", "1"]), SqlType::Boolean);
        assert_eq!(infer_column_type(["true", "0", " false "]), SqlType::Boolean);
    }

    #[test]
    fn test_int() {
        assert_eq!(infer_column_type(["1", "2", "-3", "+4"]), SqlType::Int);
        assert_eq!(infer_column_type(["2147483647"]), SqlType::Int);
    }

    #[test]
    fn test_ten_digits_above_i32_max_is_bigint() {
        assert_eq!(infer_column_type(["1", "2147483648"]), SqlType::BigInt);
        assert_eq!(infer_column_type(["9999999999", "5"]), SqlType::BigInt);
    }

    #[test]
    fn test_more_than_ten_digits_is_bigint() {
        assert_eq!(infer_column_type(["00000000001"]), SqlType::BigInt);
        assert_eq!(infer_column_type(["-1000000000"]), SqlType::BigInt);
    }

    #[test]
    fn test_bigint_requires_every_value_to_be_integer() {
        assert_eq!(
            infer_column_type(["12345678901", "abc"]),
            SqlType::Varchar(11)
        );
    }

    #[test]
    fn test_float_and_double_by_length() {
        assert_eq!(infer_column_type(["10.5", "3"]), SqlType::Float);
        assert_eq!(infer_column_type(["1234.567"]), SqlType::Double);
        assert_eq!(infer_column_type(["1.5e10"]), SqlType::Float);
    }

    #[test]
    fn test_integer_out_of_i64_range_is_double() {
        assert_eq!(
            infer_column_type(["123456789012345678901234"]),
            SqlType::Double
        );
    }

    #[test]
    fn test_non_finite_is_not_decimal() {
        assert_eq!(infer_column_type(["NaN", "1.5"]), SqlType::Varchar(3));
        assert_eq!(infer_column_type(["inf"]), SqlType::Varchar(3));
    }

    #[test]
    fn test_temporal_types() {
        assert_eq!(infer_column_type(["2020-01-01", "2020-02-30"]), SqlType::Date);
        assert_eq!(infer_column_type(["2020-01-01 10:00:00"]), SqlType::DateTime);
        assert_eq!(infer_column_type(["2020-01-01T10:00:00Z"]), SqlType::Timestamp);
        assert_eq!(infer_column_type(["10:00:00", "23:59:59"]), SqlType::Time);
    }

    #[test]
    fn test_four_digit_years_are_caught_by_int_first() {
        assert_eq!(infer_column_type(["1999", "2024"]), SqlType::Int);
    }

    #[test]
    fn test_mixed_dates_fall_back_to_varchar() {
        assert_eq!(
            infer_column_type(["2020-01-01", "2020-01-01 10:00:00"]),
            SqlType::Varchar(19)
        );
    }

    #[test]
    fn test_json_and_uuid() {
        assert_eq!(infer_column_type([r#"{"a":1}"#, "{}"]), SqlType::Json);
        assert_eq!(
            infer_column_type(["550e8400-e29b-41d4-a716-446655440000"]),
            SqlType::Uuid
        );
    }

    #[test]
    fn test_text_fallback_sizes() {
        assert_eq!(infer_column_type(["abc", "hello"]), SqlType::Varchar(5));
        assert_eq!(infer_column_type(["x".repeat(300)]), SqlType::Text);
        assert_eq!(infer_column_type(["x".repeat(70_000)]), SqlType::MediumText);
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(infer_column_type(["žluť"]), SqlType::Varchar(4));
    }

    #[test]
    fn test_padded_text_is_sized_as_written() {
        assert_eq!(infer_column_type(["abc", " hello "]), SqlType::Varchar(7));
        assert_eq!(infer_column_type([" ab", "abcd"]), SqlType::Varchar(4));
    }

    #[test]
    fn test_multibyte_text_is_sized_in_bytes() {
        let euros = "€".repeat(30_000);
        assert_eq!(euros.len(), 90_000);
        assert_eq!(infer_column_type([euros.as_str()]), SqlType::MediumText);

        let under_limit = "€".repeat(21_845);
        assert_eq!(infer_column_type([under_limit.as_str()]), SqlType::Text);
    }

    #[test]
    fn test_padding_does_not_change_numeric_decision() {
        // Float precision still follows the trimmed value
        assert_eq!(infer_column_type(["  10.5  ", "3"]), SqlType::Float);

        let mut inferrer = ColumnTypeInferrer::new();
        inferrer.observe("  10.5  ");
        assert_eq!(inferrer.stats().max_length, 4);
        assert_eq!(inferrer.stats().max_cell_chars, 8);
    }

    #[test]
    fn test_blanks_are_excluded_from_vote() {
        assert_eq!(infer_column_type(["", "  ", "42"]), SqlType::Int);

        let mut inferrer = ColumnTypeInferrer::new();
        for value in ["", " ", "42"] {
            inferrer.observe(value);
        }
        assert_eq!(inferrer.stats().nulls, 2);
        assert_eq!(inferrer.stats().values, 1);
    }

    #[test]
    fn test_all_blank_column_is_boolean() {
        assert_eq!(infer_column_type(["", " "]), SqlType::Boolean);
        assert_eq!(infer_column_type(Vec::<String>::new()), SqlType::Boolean);
    }

    #[test]
    fn test_profile_columns_scans_full_rows() {
        let header = vec!["id".to_string(), "amount".to_string(), "joined".to_string()];
        let rows = vec![
            vec!["1".to_string(), "10.5".to_string(), "2020-01-01".to_string()],
            vec!["2".to_string(), "".to_string(), "2020-02-30".to_string()],
            vec!["3".to_string()],
        ];

        let profiles = profile_columns(&header, &rows);
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0].name, "id");
        assert_eq!(profiles[0].inferred_type, SqlType::Int);
        assert!(!profiles[0].has_nulls());
        assert_eq!(profiles[1].inferred_type, SqlType::Float);
        assert_eq!(profiles[1].null_count, 2);
        assert_eq!(profiles[2].inferred_type, SqlType::Date);
        assert_eq!(profiles[2].max_observed_length, 10);
    }
}
