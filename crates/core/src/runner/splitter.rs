//! Splitting SQL scripts into statements

/// Split a script into statements at every `;` outside quoted text
///
/// Quotes are `'`, `"` and `` ` ``; inside a quote a backslash escapes the
/// next character. Statements are trimmed and returned without their
/// terminating `;`. Whitespace-only fragments are dropped and a trailing
/// fragment without `;` is still returned as a statement.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut quote: Option<char> = None;
    let mut escape_next = false;
    let mut start = 0;

    for (i, c) in script.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match (quote, c) {
            (Some(_), '\\') => escape_next = true,
            (Some(open), c) if c == open => quote = None,
            (None, '\'' | '"' | '`') => quote = Some(c),
            (None, ';') => {
                push_statement(&mut statements, &script[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    push_statement(&mut statements, &script[start..]);
    statements
}

fn push_statement(statements: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_semicolons() {
        let stmts = split_statements("CREATE TABLE a (x INT);\nINSERT INTO a VALUES (1);\n");
        assert_eq!(stmts, vec!["CREATE TABLE a (x INT)", "INSERT INTO a VALUES (1)"]);
    }

    #[test]
    fn test_semicolon_inside_quotes_is_kept() {
        let stmts = split_statements("INSERT INTO t VALUES ('a;b', \"c;d\");SELECT `x;y` FROM t;");
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0], "INSERT INTO t VALUES ('a;b', \"c;d\")");
        assert_eq!(stmts[1], "SELECT `x;y` FROM t");
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let stmts = split_statements(r"INSERT INTO t VALUES ('O\'Brien; Jr');SELECT 1;");
        assert_eq!(stmts, vec![r"INSERT INTO t VALUES ('O\'Brien; Jr')", "SELECT 1"]);
    }

    #[test]
    fn test_escaped_backslash_before_quote() {
        let stmts = split_statements(r"INSERT INTO t VALUES ('C:\\');SELECT 2;");
        assert_eq!(stmts, vec![r"INSERT INTO t VALUES ('C:\\')", "SELECT 2"]);
    }

    #[test]
    fn test_other_quote_chars_inside_string() {
        let stmts = split_statements("SELECT 'it\"s; fine';SELECT 3");
        assert_eq!(stmts, vec!["SELECT 'it\"s; fine'", "SELECT 3"]);
    }

    #[test]
    fn test_empty_fragments_dropped() {
        assert!(split_statements("  ;\n ; ").is_empty());
        assert!(split_statements("").is_empty());
    }

    #[test]
    fn test_trailing_fragment_without_terminator() {
        let stmts = split_statements("SELECT 1;\nSELECT 2");
        assert_eq!(stmts, vec!["SELECT 1", "SELECT 2"]);
    }
}
