use crate::error::LoaderResult;
use crate::monitoring::SystemStats;
use crate::types::{FileImport, ImportStatus, TableSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::PathBuf;

/// Everything a run did: per-file outcomes, the resulting tables and timings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub database_path: PathBuf,
    pub imports: Vec<FileImport>,
    pub tables: Vec<TableSummary>,
    pub stats: SystemStats,
    pub completed_at: DateTime<Utc>,
}

impl RunReport {
    pub fn imported_count(&self) -> usize {
        self.imports.iter().filter(|i| i.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.imports.len() - self.imported_count()
    }

    pub fn failed_imports(&self) -> impl Iterator<Item = &FileImport> {
        self.imports.iter().filter(|i| !i.succeeded())
    }

    pub fn is_successful(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn table(&self, name: &str) -> Option<&TableSummary> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn total_rows_imported(&self) -> u64 {
        self.imports
            .iter()
            .map(|i| match i.status {
                ImportStatus::Imported { rows } => rows,
                ImportStatus::Failed { .. } => 0,
            })
            .sum()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{} of {} files imported, {} failed, {} tables, {} rows",
            self.imported_count(),
            self.imports.len(),
            self.failed_count(),
            self.tables.len(),
            self.total_rows_imported()
        )
    }

    /// Print the table listing that closes every run
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Database created successfully with the following tables:")?;
        for table in &self.tables {
            writeln!(out, "- {}: {} rows", table.name, table.row_count)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> LoaderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
