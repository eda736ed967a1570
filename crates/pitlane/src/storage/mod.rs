//! Storage layer for pitlane.
//!
//! Read access to the team operations database. Every list operation takes a
//! [`ListQuery`] over named fields and returns a [`Page`]; every detail
//! operation returns exactly one row or [`Error::NotFound`]. Relations that
//! callers routinely need (team names, car and part fields on installations,
//! garage bays, work order assignments) are joined or batch-loaded here so no
//! caller issues a query per row.

mod cars;
mod garages;
mod parts;
mod people;
mod sessions;
mod teams;
mod work_orders;

pub mod migrations;
pub mod query;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

use std::path::{Path, PathBuf};

use rusqlite::{params_from_iter, Connection, OpenFlags, OptionalExtension, Row};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use query::{Direction, ListQuery, OrderBy, Page, Predicate, Table, Window};

/// Most ids bound into one `IN (...)` list. SQLite rejects statements with
/// more than 32766 variables.
const MAX_BOUND_IDS: usize = 10_000;

/// Handle on the team operations database.
///
/// A `Storage` wraps one connection. The HTTP layer opens a read-only one per
/// request; `pitlane db init` and tests open writable ones.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a writable database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist
    /// and brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA foreign_keys=ON;",
        )?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Open an existing database without write access.
    ///
    /// No schema changes are attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&path, flags).map_err(|source| {
            Error::DatabaseOpen {
                path: path.clone(),
                source,
            }
        })?;

        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count rows per data table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let mut tables = Vec::with_capacity(schema::DATA_TABLES.len());
        for &table in schema::DATA_TABLES {
            let rows: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                        row.get(0)
                    })?;
            tables.push(TableCount {
                table,
                rows: u64::try_from(rows).unwrap_or(0),
            });
        }

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            tables,
            db_size_bytes,
        })
    }

    /// Run a list query against a table, returning one window of rows and
    /// the total match count.
    fn fetch_page<T, F>(&self, table: &Table, query: &ListQuery, map: F) -> Result<Page<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let compiled = query.compile(table)?;

        let count_sql = format!("SELECT COUNT(*) FROM {}{}", table.from, compiled.where_sql);
        let count: i64 = self.conn.query_row(
            &count_sql,
            params_from_iter(compiled.params.iter()),
            |row| row.get(0),
        )?;

        let sql = format!(
            "{}{}{}{}",
            table.select_sql(),
            compiled.where_sql,
            compiled.order_sql,
            compiled.window_sql
        );
        debug!(table = table.name, %sql, "list query");

        let mut stmt = self.conn.prepare(&sql)?;
        let results = stmt
            .query_map(params_from_iter(compiled.params.iter()), map)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Page {
            count: u64::try_from(count).unwrap_or(0),
            results,
        })
    }

    /// Fetch one row of a table by primary key.
    fn fetch_one<T, F>(&self, table: &Table, id: i64, map: F) -> Result<T>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!("{} WHERE {} = ?1", table.select_sql(), table.key);
        self.conn
            .query_row(&sql, [id], map)
            .optional()?
            .ok_or_else(|| Error::not_found(table.name, id))
    }

    /// Fetch every row of a table whose `column` is one of `ids`.
    ///
    /// `order` is appended verbatim; pass an empty string to keep the
    /// store's natural row order. Ids are bound in chunks of
    /// [`MAX_BOUND_IDS`], so `order` applies within each chunk and all rows
    /// sharing one id come from the same statement.
    fn fetch_in<T, F>(
        &self,
        table: &Table,
        column: &str,
        ids: &[i64],
        order: &str,
        mut map: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut rows = Vec::new();
        for chunk in ids.chunks(MAX_BOUND_IDS) {
            let sql = format!(
                "{} WHERE {column} IN ({}){order}",
                table.select_sql(),
                query::placeholders(chunk.len())
            );
            let mut stmt = self.conn.prepare_cached(&sql)?;
            for row in stmt.query_map(params_from_iter(chunk.iter()), &mut map)? {
                rows.push(row?);
            }
        }
        Ok(rows)
    }
}

/// Row count for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    /// Table name.
    pub table: &'static str,
    /// Number of rows.
    pub rows: u64,
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Row counts per data table.
    pub tables: Vec<TableCount>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
