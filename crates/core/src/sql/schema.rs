//! CREATE TABLE generation for inferred column profiles.

use super::encoder::quote_literal;
use super::identifier::{identity_column, quote_identifier};
use crate::inference::ColumnProfile;

/// Comment attached to the synthetic key column
const IDENTITY_COMMENT: &str = "row ID";

/// Builder for MariaDB `CREATE TABLE` statements.
pub struct SchemaBuilder;

impl SchemaBuilder {
    /// Render the table-creation script for `table`.
    ///
    /// The table gets a synthetic `<table>_id` auto-increment primary key
    /// ahead of the data columns. Every data column is nullable and carries
    /// its raw header as a comment. The first data column, when there is
    /// one, also gets a secondary index.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sheetsql_core::inference::{ColumnProfile, SqlType};
    /// use sheetsql_core::sql::SchemaBuilder;
    ///
    /// let columns = vec![ColumnProfile::new("name", "Name", SqlType::Varchar(20))];
    /// let sql = SchemaBuilder::build("people", &columns);
    /// assert!(sql.starts_with("CREATE TABLE `people` ("));
    /// assert!(sql.ends_with(") ENGINE = INNODB;\n"));
    /// ```
    pub fn build(table: &str, columns: &[ColumnProfile]) -> String {
        let identity = quote_identifier(&identity_column(table));

        let mut definitions = Vec::with_capacity(columns.len() + 3);
        definitions.push(format!(
            "  {} INT NOT NULL AUTO_INCREMENT COMMENT {}",
            identity,
            quote_literal(IDENTITY_COMMENT)
        ));

        for column in columns {
            definitions.push(format!(
                "  {} {} DEFAULT NULL COMMENT {}",
                quote_identifier(&column.name),
                column.inferred_type,
                quote_literal(&column.raw_header)
            ));
        }

        definitions.push(format!("  PRIMARY KEY ({})", identity));

        if let Some(first) = columns.first().map(|c| &c.name) {
            definitions.push(format!(
                "  INDEX {} ({})",
                quote_identifier(&format!("idx_{}", first)),
                quote_identifier(first)
            ));
        }

        format!(
            "CREATE TABLE {} (\n{}\n) ENGINE = INNODB;\n",
            quote_identifier(table),
            definitions.join(",\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::SqlType;

    fn profiles() -> Vec<ColumnProfile> {
        vec![
            ColumnProfile::new("id", "ID", SqlType::Int),
            ColumnProfile::new("amount", "Amount", SqlType::Float),
            ColumnProfile::new("joined", "Joined On", SqlType::Date),
        ]
    }

    #[test]
    fn test_build_full_table() {
        let sql = SchemaBuilder::build("customers", &profiles());
        let expected = "CREATE TABLE `customers` (\n\
            \x20 `customers_id` INT NOT NULL AUTO_INCREMENT COMMENT 'row ID',\n\
            \x20 `id` INT DEFAULT NULL COMMENT 'ID',\n\
            \x20 `amount` FLOAT DEFAULT NULL COMMENT 'Amount',\n\
            \x20 `joined` DATE DEFAULT NULL COMMENT 'Joined On',\n\
            \x20 PRIMARY KEY (`customers_id`),\n\
            \x20 INDEX `idx_id` (`id`)\n\
            ) ENGINE = INNODB;\n";
        assert_eq!(sql, expected);
    }

    #[test]
    fn test_single_data_column_is_indexed() {
        let columns = vec![ColumnProfile::new("name", "Name", SqlType::Varchar(5))];
        let sql = SchemaBuilder::build("people", &columns);
        assert!(sql.contains("PRIMARY KEY (`people_id`),\n  INDEX `idx_name` (`name`)\n)"));
        assert_eq!(sql.matches("INDEX").count(), 1);
    }

    #[test]
    fn test_no_data_columns_has_no_index() {
        let sql = SchemaBuilder::build("people", &[]);
        assert!(!sql.contains("INDEX"));
        assert!(sql.contains("PRIMARY KEY (`people_id`)\n)"));
    }

    #[test]
    fn test_comment_is_escaped() {
        let columns = vec![ColumnProfile::new("owner", "Owner's \"name\"", SqlType::Text)];
        let sql = SchemaBuilder::build("pets", &columns);
        assert!(sql.contains(r#"COMMENT 'Owner\'s \"name\"'"#));
    }

    #[test]
    fn test_reserved_words_are_quoted() {
        let columns = vec![
            ColumnProfile::new("order", "Order", SqlType::Int),
            ColumnProfile::new("select", "Select", SqlType::Boolean),
        ];
        let sql = SchemaBuilder::build("group", &columns);
        assert!(sql.starts_with("CREATE TABLE `group` ("));
        assert!(sql.contains("INDEX `idx_order` (`order`)"));
    }
}
