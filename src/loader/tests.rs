use super::*;
use crate::config::LoaderConfig;
use crate::sqlite_writer::Destination;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[cfg(test)]
mod naming_tests {
    use super::*;

    #[test]
    fn test_top_level_table_name_strips_extension() {
        assert_eq!(top_level_table_name("athletes.csv"), "athletes");
        assert_eq!(top_level_table_name("medallists.csv"), "medallists");
        assert_eq!(top_level_table_name("archive.2024.csv"), "archive.2024");
    }

    #[test]
    fn test_results_table_name_normalizes_spaces_and_case() {
        let cases = [
            ("Swimming 100m.csv", "results_swimming_100m"),
            ("ARCHERY.csv", "results_archery"),
            ("Beach Volleyball Women.csv", "results_beach_volleyball_women"),
            ("  Padded.csv", "results___padded"),
            ("mixed_Case Name.csv", "results_mixed_case_name"),
            ("already_lower.csv", "results_already_lower"),
        ];

        for (file_name, expected) in cases {
            let path = PathBuf::from("results").join(file_name);
            assert_eq!(results_table_name("results_", &path), expected, "file {}", file_name);
        }
    }
}

#[cfg(test)]
mod discovery_tests {
    use super::*;

    #[test]
    fn test_missing_expected_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_file(&dir.path().join("nocs.csv"), "code\nFRA\n");
        write_file(&dir.path().join("athletes.csv"), "id\n1\n");

        let config = LoaderConfig::new(dir.path(), dir.path().join("out.db"));
        let sources = discover_sources(&config);

        let tables: Vec<&str> = sources.iter().map(|s| s.table_name.as_str()).collect();
        assert_eq!(tables, vec!["athletes", "nocs"]);
    }

    #[test]
    fn test_results_directory_is_flat_and_filtered() {
        let dir = TempDir::new().unwrap();
        let results = dir.path().join("results");
        write_file(&results.join("Swimming 100m.csv"), "rank\n1\n");
        write_file(&results.join("Archery.csv"), "rank\n1\n");
        write_file(&results.join("notes.txt"), "ignore me");
        write_file(&results.join("nested").join("Diving.csv"), "rank\n1\n");

        let config = LoaderConfig::new(dir.path(), dir.path().join("out.db"));
        let sources = discover_sources(&config);

        let tables: Vec<&str> = sources.iter().map(|s| s.table_name.as_str()).collect();
        assert_eq!(tables, vec!["results_archery", "results_swimming_100m"]);
    }

    #[test]
    fn test_no_sources_in_empty_directory() {
        let dir = TempDir::new().unwrap();
        let config = LoaderConfig::new(dir.path(), dir.path().join("out.db"));
        assert!(discover_sources(&config).is_empty());
    }
}

#[cfg(test)]
mod import_file_tests {
    use super::*;

    #[test]
    fn test_import_file_success_message() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("teams.csv");
        write_file(&source, "code,name\nFRA,France\n");

        let loader = Loader::new(LoaderConfig::new(dir.path(), dir.path().join("out.db")));
        let mut destination = Destination::create(&dir.path().join("out.db")).unwrap();
        let mut out = Vec::new();

        assert!(loader.import_file(&mut destination, &source, "teams", &mut out));
        assert_eq!(String::from_utf8(out).unwrap(), "Imported teams.csv as table 'teams'\n");
        assert_eq!(destination.count_rows("teams").unwrap(), 1);
    }

    #[test]
    fn test_import_file_failure_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("coaches.csv");
        write_file(&source, "id,name\n1,Ana,extra\n");

        let loader = Loader::new(LoaderConfig::new(dir.path(), dir.path().join("out.db")));
        let mut destination = Destination::create(&dir.path().join("out.db")).unwrap();
        let mut out = Vec::new();

        assert!(!loader.import_file(&mut destination, &source, "coaches", &mut out));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with(&format!("Error importing {}: ", source.display())), "{}", printed);
        assert!(destination.table_names().unwrap().is_empty());

        let stats = loader.monitor().get_system_stats();
        assert_eq!(stats.failed_operations, 1);
    }

    #[test]
    fn test_import_file_rejects_empty_table_name() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("venues.csv");
        write_file(&source, "name\nBercy\n");

        let loader = Loader::new(LoaderConfig::new(dir.path(), dir.path().join("out.db")));
        let mut destination = Destination::create(&dir.path().join("out.db")).unwrap();
        let mut out = Vec::new();

        assert!(!loader.import_file(&mut destination, &source, "", &mut out));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with("Import error: Table name must not be empty\n"), "{}", printed);
        assert!(destination.table_names().unwrap().is_empty());
    }

    #[test]
    fn test_import_file_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        write_file(&first, "id\n1\n2\n3\n");
        write_file(&second, "id\n9\n");

        let loader = Loader::new(LoaderConfig::new(dir.path(), dir.path().join("out.db")));
        let mut destination = Destination::create(&dir.path().join("out.db")).unwrap();
        let mut out = Vec::new();

        assert!(loader.import_file(&mut destination, &first, "medals", &mut out));
        assert!(loader.import_file(&mut destination, &second, "medals", &mut out));
        assert_eq!(destination.count_rows("medals").unwrap(), 1);
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;
    use crate::monitoring::SystemStats;
    use crate::types::{FileImport, ImportStatus, SourceFile, TableSummary};

    fn sample_report() -> RunReport {
        RunReport {
            database_path: PathBuf::from("olympics.db"),
            imports: vec![
                FileImport {
                    source: SourceFile::new("data/athletes.csv", "athletes"),
                    status: ImportStatus::Imported { rows: 3 },
                },
                FileImport {
                    source: SourceFile::new("data/coaches.csv", "coaches"),
                    status: ImportStatus::Failed { message: "Parse error: bad".into() },
                },
            ],
            tables: vec![TableSummary { name: "athletes".into(), row_count: 3 }],
            stats: SystemStats::default(),
            completed_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_report_counts() {
        let report = sample_report();
        assert_eq!(report.imported_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_successful());
        assert_eq!(report.total_rows_imported(), 3);
        assert_eq!(report.failed_imports().next().unwrap().source.table_name, "coaches");
        assert_eq!(report.table("athletes").unwrap().row_count, 3);
        assert!(report.table("coaches").is_none());
    }

    #[test]
    fn test_write_summary_format() {
        let mut out = Vec::new();
        sample_report().write_summary(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nDatabase created successfully with the following tables:\n- athletes: 3 rows\n"
        );
    }

    #[test]
    fn test_report_json() {
        let json: serde_json::Value = serde_json::from_str(&sample_report().to_json().unwrap()).unwrap();
        assert_eq!(json["tables"][0]["name"], "athletes");
        assert_eq!(json["imports"][0]["status"], "imported");
        assert_eq!(json["imports"][0]["rows"], 3);
        assert_eq!(json["imports"][1]["status"], "failed");
    }
}
