//! MariaDB script generation
//!
//! Turns column profiles and raw rows into the two scripts written per sheet:
//! a `CREATE TABLE` statement and a series of batched `INSERT` statements.
//! All identifiers are sanitized and quoted, and all values are escaped.

pub mod encoder;
pub mod identifier;
mod insert;
mod schema;

pub use encoder::{NULL_LITERAL, encode_value, escape_string, quote_literal};
pub use identifier::{
    ColumnNamer, identity_column, quote_identifier, sanitize_identifier, table_name_from_path,
};
pub use insert::{BatchInsertWriter, DEFAULT_BATCH_SIZE, InsertScripts};
pub use schema::SchemaBuilder;
