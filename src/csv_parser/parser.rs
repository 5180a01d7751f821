use crate::csv_parser::type_inference::ColumnTypeResolver;
use crate::error::{LoaderError, LoaderResult};
use crate::types::{Column, TabularData};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads a complete CSV file into a column-oriented table.
///
/// The whole file is buffered before any column type is chosen, so a value
/// late in the file can still widen its column (an integer column that ends
/// with a text cell is stored as text).
#[derive(Debug, Clone)]
pub struct CsvTableParser {
    delimiter: u8,
    resolver: ColumnTypeResolver,
}

impl Default for CsvTableParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvTableParser {
    pub fn new() -> Self {
        Self::with_delimiter(b',')
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter,
            resolver: ColumnTypeResolver::new(),
        }
    }

    /// Parse the CSV file at `path`
    pub fn parse_file(&self, path: &Path) -> LoaderResult<TabularData> {
        info!("Parsing CSV file: {:?}", path);
        let file = File::open(path)?;
        self.parse_reader(file)
    }

    /// Parse CSV data from any reader
    pub fn parse_reader<R: Read>(&self, reader: R) -> LoaderResult<TabularData> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(LoaderError::parse("No columns to parse from file"));
        }

        let width = headers.len();
        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); width];
        let mut row_count = 0usize;

        for record in reader.records() {
            let record = record?;
            if record.len() > width {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(LoaderError::parse(format!(
                    "Error tokenizing data. Expected {} fields in line {}, saw {}",
                    width,
                    line,
                    record.len()
                )));
            }

            // Short rows are padded with missing values
            for (index, column) in raw_columns.iter_mut().enumerate() {
                column.push(record.get(index).unwrap_or("").to_string());
            }
            row_count += 1;
        }

        let names = dedupe_header_names(
            headers
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    if name.is_empty() {
                        format!("Unnamed: {}", index)
                    } else {
                        name.to_string()
                    }
                })
                .collect(),
        );

        let columns: Vec<Column> = names
            .into_iter()
            .zip(raw_columns)
            .map(|(name, raw)| self.resolver.resolve_column(sanitize_column_name(&name), &raw[..]))
            .collect();

        let columns = collapse_duplicate_columns(columns);
        debug!("Parsed {} rows across {} columns", row_count, columns.len());

        Ok(TabularData { columns, row_count })
    }
}

/// Strip surrounding single and double quote characters from a header
pub fn sanitize_column_name(name: &str) -> String {
    name.trim_matches(|c: char| c == '"' || c == '\'').to_string()
}

/// Rename repeated raw header names to `name.1`, `name.2`, ...
pub fn dedupe_header_names(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut deduped = Vec::with_capacity(names.len());

    for mut name in names {
        let mut seen = counts.get(&name).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(name.clone(), seen + 1);
            name = format!("{}.{}", name, seen);
            seen = counts.get(&name).copied().unwrap_or(0);
        }
        counts.insert(name.clone(), seen + 1);
        deduped.push(name);
    }

    deduped
}

/// Columns sharing a sanitized name collapse into one; the last one's values
/// win and it keeps the position of the first.
fn collapse_duplicate_columns(columns: Vec<Column>) -> Vec<Column> {
    let mut collapsed: Vec<Column> = Vec::with_capacity(columns.len());

    for column in columns {
        if let Some(existing) = collapsed.iter_mut().find(|c| c.name == column.name) {
            warn!(column = %column.name, "Duplicate column name after sanitizing, keeping the last one");
            *existing = column;
        } else {
            collapsed.push(column);
        }
    }

    collapsed
}
