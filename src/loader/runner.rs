use crate::config::LoaderConfig;
use crate::csv_parser::CsvTableParser;
use crate::error::{LoaderError, LoaderResult};
use crate::loader::layout::discover_sources;
use crate::loader::report::RunReport;
use crate::monitoring::{MonitoringConfig, MonitoringSystem};
use crate::sqlite_writer::Destination;
use crate::types::{FileImport, ImportStatus, SourceFile};
use chrono::Utc;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use tracing::{error, info, warn};

/// Runs the CSV directory → SQLite import
pub struct Loader {
    config: LoaderConfig,
    parser: CsvTableParser,
    monitor: MonitoringSystem,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_monitoring(config, MonitoringConfig::default())
    }

    pub fn with_monitoring(config: LoaderConfig, monitoring: MonitoringConfig) -> Self {
        Self {
            config,
            parser: CsvTableParser::new(),
            monitor: MonitoringSystem::new(monitoring),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn monitor(&self) -> &MonitoringSystem {
        &self.monitor
    }

    /// Import one CSV file as `table_name`, replacing any table of that name.
    ///
    /// Failures are reported on `out` and turned into `false`; they never
    /// propagate.
    pub fn import_file<W: Write>(
        &self,
        destination: &mut Destination,
        source: &Path,
        table_name: &str,
        out: &mut W,
    ) -> bool {
        self.import_source(destination, &SourceFile::new(source, table_name), out)
            .succeeded()
    }

    fn import_source<W: Write>(
        &self,
        destination: &mut Destination,
        source: &SourceFile,
        out: &mut W,
    ) -> FileImport {
        let tracker = self.monitor.start_operation(&format!("import {}", source.table_name));

        let status = match self.load_into(destination, source) {
            Ok(rows) => {
                self.monitor.complete_success(tracker, rows);
                console(
                    out,
                    format_args!("Imported {} as table '{}'", source.display_name(), source.table_name),
                );
                ImportStatus::Imported { rows }
            }
            Err(e) => {
                let message = e.to_string();
                error!(file = ?source.path, table = %source.table_name, "Import failed: {}", message);
                self.monitor.complete_failure(tracker, &message);
                console(
                    out,
                    format_args!("Error importing {}: {}", source.path.display(), message),
                );
                ImportStatus::Failed { message }
            }
        };

        FileImport {
            source: source.clone(),
            status,
        }
    }

    fn load_into(&self, destination: &mut Destination, source: &SourceFile) -> LoaderResult<u64> {
        if source.table_name.is_empty() {
            return Err(LoaderError::import("Table name must not be empty"));
        }

        let data = self.parser.parse_file(&source.path)?;
        destination.write_table(&source.table_name, &data)
    }

    /// Run the whole import, printing diagnostics and the summary to stdout
    pub fn run(&self) -> LoaderResult<RunReport> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_with_output(&mut out)
    }

    /// Run the whole import, printing diagnostics and the summary to `out`.
    ///
    /// Only destination failures abort the run. The destination is closed on
    /// every return path: explicitly on success, by drop otherwise.
    pub fn run_with_output<W: Write>(&self, out: &mut W) -> LoaderResult<RunReport> {
        info!(
            "Loading {:?} into {:?}",
            self.config.source_dir, self.config.database_path
        );

        let mut destination = Destination::create(&self.config.database_path)?;

        let sources = discover_sources(&self.config);
        info!("Discovered {} CSV files to import", sources.len());

        let mut imports = Vec::with_capacity(sources.len());
        for source in &sources {
            imports.push(self.import_source(&mut destination, source, out));
        }

        let tables = destination.summarize()?;
        let report = RunReport {
            database_path: self.config.database_path.clone(),
            imports,
            tables,
            stats: self.monitor.get_system_stats(),
            completed_at: Utc::now(),
        };

        report.write_summary(out)?;
        destination.close()?;

        if report.is_successful() {
            info!("Run finished: {}", report.summary());
        } else {
            warn!("Run finished with failures: {}", report.summary());
        }

        Ok(report)
    }
}

/// Run an import with `config`, printing to stdout
pub fn run(config: &LoaderConfig) -> LoaderResult<RunReport> {
    Loader::new(config.clone()).run()
}

fn console<W: Write>(out: &mut W, line: fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", line) {
        warn!("Failed to write console output: {}", e);
    }
}
