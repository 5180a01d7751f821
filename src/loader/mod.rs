// Run orchestration: source discovery, per-file import and the summary report
pub mod layout;
pub mod report;
pub mod runner;

#[cfg(test)]
mod tests;

pub use layout::{discover_sources, results_table_name, top_level_table_name};
pub use report::RunReport;
pub use runner::{run, Loader};
