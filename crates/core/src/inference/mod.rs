//! Column type inference for spreadsheet data
//!
//! Every value in a sheet arrives as untyped text. This module decides, per
//! column, which MariaDB type the values will be stored as.
//!
//! ## Precedence
//!
//! Rules are tried in order and the first rule every non-blank value
//! satisfies wins:
//!
//! 1. `BOOLEAN` - `true`, `false`, `1`, `0`
//! 2. `INT` / `BIGINT` - base-10 integers
//! 3. `FLOAT` / `DOUBLE` - finite decimals
//! 4. `DATE`, `DATETIME`, `TIMESTAMP`, `TIME`, `YEAR`
//! 5. `JSON` - text wrapped in braces
//! 6. `UUID`
//! 7. `VARCHAR(n)`, `TEXT`, `MEDIUMTEXT`, `LONGTEXT` by longest value
//!
//! ## Example
//!
//! ```rust
//! use sheetsql_core::inference::{SqlType, infer_column_type};
//!
//! assert_eq!(infer_column_type(["1", "0", "1"]), SqlType::Boolean);
//! assert_eq!(infer_column_type(["10.5", "3"]), SqlType::Float);
//! assert_eq!(infer_column_type(["2020-02-30"]), SqlType::Date);
//! ```

mod formats;
mod inferrer;
mod types;

pub use formats::{BOOLEAN_TOKENS, Format, is_boolean_token, matches_temporal};
pub use inferrer::{ColumnStats, ColumnTypeInferrer, infer_column_type, profile_columns};
pub use types::{
    ColumnProfile, MAX_MEDIUMTEXT_BYTES, MAX_TEXT_BYTES, MAX_VARCHAR_LENGTH, SqlType,
};
