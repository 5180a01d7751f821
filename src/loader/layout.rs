use crate::config::LoaderConfig;
use crate::types::SourceFile;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Table name for a top-level file: its name without the extension
pub fn top_level_table_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// Table name for a results file: prefix + stem with spaces as underscores, lower-cased
pub fn results_table_name(prefix: &str, path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}", prefix, stem.replace(' ', "_").to_lowercase())
}

/// Every file a run will import, in import order.
///
/// Expected top-level files come first in their configured order; missing
/// ones are skipped without a diagnostic. Results files follow, sorted by
/// file name.
pub fn discover_sources(config: &LoaderConfig) -> Vec<SourceFile> {
    let mut sources = Vec::new();

    for file_name in &config.expected_files {
        let path = config.source_dir.join(file_name);
        if path.exists() {
            sources.push(SourceFile::new(path, top_level_table_name(file_name)));
        } else {
            debug!("Skipping absent file {:?}", path);
        }
    }

    let results_dir = config.results_path();
    if results_dir.is_dir() {
        match list_results_files(&results_dir, &config.extension) {
            Ok(paths) => {
                for path in paths {
                    let table_name = results_table_name(&config.results_prefix, &path);
                    sources.push(SourceFile::new(path, table_name));
                }
            }
            Err(e) => warn!("Could not list results directory {:?}: {}", results_dir, e),
        }
    }

    sources
}

/// Files directly inside `dir` with the given extension, sorted by name
fn list_results_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches_extension = path
            .extension()
            .map_or(false, |ext| ext.to_string_lossy() == extension);
        if matches_extension && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}
