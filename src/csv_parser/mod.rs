// CSV parsing and whole-column type inference
pub mod parser;
pub mod type_inference;


pub use parser::{dedupe_header_names, sanitize_column_name, CsvTableParser};
pub use type_inference::{classify, ColumnProfile, ColumnTypeResolver, ValueKind};
