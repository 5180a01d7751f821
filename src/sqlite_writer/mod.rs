// SQLite destination: creation, table replacement and row counts
pub mod destination;
pub mod sql_generator;


pub use destination::Destination;
pub use sql_generator::SQLGenerator;
