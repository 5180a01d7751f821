pub mod config;
pub mod csv_parser;
pub mod error;
pub mod loader;
pub mod monitoring;
pub mod sqlite_writer;
pub mod types;

pub use config::LoaderConfig;
pub use error::{LoaderError, LoaderResult};
pub use loader::{run, Loader, RunReport};
