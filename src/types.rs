use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Storage type resolved for a whole CSV column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit signed integer
    Integer,
    /// Double precision float
    Real,
    /// true/false tokens, stored as 0/1
    Boolean,
    /// Raw cell text
    Text,
}

impl ColumnType {
    /// Declared SQLite type for the column
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer | ColumnType::Boolean => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_type())
    }
}

/// A single typed cell ready to be bound into an INSERT
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Null => ToSqlOutput::Owned(Value::Null),
            CellValue::Integer(value) => ToSqlOutput::Owned(Value::Integer(*value)),
            CellValue::Real(value) => ToSqlOutput::Owned(Value::Real(*value)),
            CellValue::Text(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
        })
    }
}

/// One named, typed column of parsed CSV data
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Sanitized column name
    pub name: String,
    /// Type resolved from every value in the column
    pub column_type: ColumnType,
    /// Cell values in row order
    pub values: Vec<CellValue>,
}

/// Column-oriented in-memory table produced from one CSV file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularData {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl TabularData {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cells of one row, in column order
    pub fn row(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.columns.iter().map(move |c| &c.values[index])
    }
}

/// A CSV file scheduled for import and the table it lands in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub table_name: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, table_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            table_name: table_name.into(),
        }
    }

    /// File name as shown in console diagnostics
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Outcome of importing one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportStatus {
    Imported { rows: u64 },
    Failed { message: String },
}

/// Per-file entry of a run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileImport {
    pub source: SourceFile,
    #[serde(flatten)]
    pub status: ImportStatus,
}

impl FileImport {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, ImportStatus::Imported { .. })
    }
}

/// Row count of a table present in the destination after the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub row_count: u64,
}
