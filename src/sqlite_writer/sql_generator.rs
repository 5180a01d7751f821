use crate::types::Column;

/// Generates the SQLite statements used to (re)create and fill a table
pub struct SQLGenerator;

impl SQLGenerator {
    /// Quote an identifier with double quotes, doubling embedded quotes
    pub fn quote_identifier(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    pub fn drop_table(table: &str) -> String {
        format!("DROP TABLE IF EXISTS {}", Self::quote_identifier(table))
    }

    /// CREATE TABLE with one declared-type column per CSV column, no index column
    pub fn create_table(table: &str, columns: &[Column]) -> String {
        let column_defs = columns
            .iter()
            .map(|c| format!("{} {}", Self::quote_identifier(&c.name), c.column_type.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");

        format!("CREATE TABLE {} ({})", Self::quote_identifier(table), column_defs)
    }

    /// Positional INSERT for every column of the table
    pub fn insert_row(table: &str, columns: &[Column]) -> String {
        let names = columns
            .iter()
            .map(|c| Self::quote_identifier(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::quote_identifier(table),
            names,
            placeholders
        )
    }

    pub fn count_rows(table: &str) -> String {
        format!("SELECT COUNT(*) FROM {}", Self::quote_identifier(table))
    }

    pub fn list_tables() -> &'static str {
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY rowid"
    }
}
