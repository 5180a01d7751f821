use crate::error::{LoaderError, LoaderResult};
use crate::sqlite_writer::sql_generator::SQLGenerator;
use crate::types::{TableSummary, TabularData};
use rusqlite::{params_from_iter, Connection};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The SQLite file a run writes into.
///
/// Owns the only connection of the run. Dropping it closes the connection, so
/// every early return out of a run releases the database; `close` is the
/// explicit path that also reports close errors.
pub struct Destination {
    path: PathBuf,
    connection: Connection,
}

impl Destination {
    /// Delete any existing file at `path` and open a fresh database there
    pub fn create(path: &Path) -> LoaderResult<Self> {
        match fs::remove_file(path) {
            Ok(()) => info!("Removed existing database at {:?}", path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let connection = Connection::open(path)?;
        info!("Created destination database at {:?}", path);

        Ok(Self {
            path: path.to_path_buf(),
            connection,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Replace `table` with the contents of `data`, returning the rows written.
    ///
    /// Drop, create and inserts share one transaction.
    pub fn write_table(&mut self, table: &str, data: &TabularData) -> LoaderResult<u64> {
        if data.columns.is_empty() {
            return Err(LoaderError::schema(format!("Table '{}' has no columns", table)));
        }

        let tx = self.connection.transaction()?;
        tx.execute(&SQLGenerator::drop_table(table), [])?;
        tx.execute(&SQLGenerator::create_table(table, &data.columns), [])?;

        {
            let mut statement = tx.prepare(&SQLGenerator::insert_row(table, &data.columns))?;
            for index in 0..data.row_count {
                statement.execute(params_from_iter(data.row(index)))?;
            }
        }

        tx.commit()?;
        debug!(table = table, rows = data.row_count, columns = data.columns.len(), "Wrote table");

        Ok(data.row_count as u64)
    }

    /// Names of every user table, in creation order
    pub fn table_names(&self) -> LoaderResult<Vec<String>> {
        let mut statement = self.connection.prepare(SQLGenerator::list_tables())?;
        let names = statement
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    pub fn count_rows(&self, table: &str) -> LoaderResult<u64> {
        let count: i64 = self
            .connection
            .query_row(&SQLGenerator::count_rows(table), [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Row counts for every table currently in the database
    pub fn summarize(&self) -> LoaderResult<Vec<TableSummary>> {
        self.table_names()?
            .into_iter()
            .map(|name| -> LoaderResult<TableSummary> {
                let row_count = self.count_rows(&name)?;
                Ok(TableSummary { name, row_count })
            })
            .collect()
    }

    pub fn close(self) -> LoaderResult<()> {
        let path = self.path;
        self.connection.close().map_err(|(_, e)| LoaderError::Database(e))?;
        info!("Closed destination database at {:?}", path);
        Ok(())
    }
}
