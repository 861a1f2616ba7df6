//! DuckDB store accessor
//!
//! The store is only ever read, so it is opened in read-only mode. The
//! connection lives inside [`DuckDb`] and is released by [`DuckDb::close`]
//! or, failing that, when the value is dropped.

pub mod models;

use crate::error::{AppError, Result};
use duckdb::{AccessMode, Config, Connection};
use models::{ColumnDescriptor, SecurityRecord};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// DuckDB database wrapper
pub struct DuckDb {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl DuckDb {
    /// Open an existing store file read-only
    pub fn open(path: &Path) -> Result<Self> {
        let unavailable = |source| AppError::StoreUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(unavailable)?;
        let conn = Connection::open_with_flags(path, config).map_err(unavailable)?;

        tracing::debug!("Opened DuckDB store {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(Some(conn)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the connection. Safe to call more than once.
    pub fn close(&self) {
        let Some(conn) = self.conn.lock().take() else {
            return;
        };

        match conn.close() {
            Ok(()) => tracing::debug!("Closed DuckDB store {}", self.path.display()),
            Err((_, e)) => tracing::warn!("Error closing DuckDB store {}: {}", self.path.display(), e),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.conn.lock().is_none()
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let guard = self.conn.lock();
        let conn = guard.as_ref().ok_or(AppError::StoreClosed)?;
        f(conn)
    }

    /// Stored name of a table or view in the current schema
    ///
    /// Matching is case-insensitive, the same way DuckDB binds identifiers.
    pub fn resolve_table(&self, table: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT table_name FROM information_schema.tables
                 WHERE table_schema = current_schema() AND lower(table_name) = lower(?)
                 ORDER BY table_name
                 LIMIT 1",
            )?;

            let mut rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
            let name = rows.next().transpose()?;
            Ok(name)
        })
    }

    /// Check whether a table or view with this name exists
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        Ok(self.resolve_table(table)?.is_some())
    }

    fn require_table(&self, table: &str) -> Result<String> {
        self.resolve_table(table)?
            .ok_or_else(|| AppError::TableNotFound(table.to_string()))
    }

    /// Introspect a table's columns in ordinal order
    pub fn table_info(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let table = self.require_table(table)?;

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT CAST(cid AS BIGINT), \"name\", \"type\", CAST(\"notnull\" AS BIGINT),
                        dflt_value, CAST(pk AS BIGINT)
                 FROM pragma_table_info({})
                 ORDER BY cid",
                quote_literal(&table)
            );
            let mut stmt = conn.prepare(&sql)?;

            let columns = stmt
                .query_map([], |row| {
                    let not_null: i64 = row.get(3)?;
                    let pk: i64 = row.get(5)?;
                    Ok(ColumnDescriptor {
                        ordinal: row.get(0)?,
                        name: row.get(1)?,
                        declared_type: row.get(2)?,
                        nullable: not_null == 0,
                        default_value: row.get(4)?,
                        primary_key: pk != 0,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            tracing::debug!("Introspected {} columns of {}", columns.len(), table);
            Ok(columns)
        })
    }

    /// Load every row of `stock_list` in store order
    pub fn load_securities(&self) -> Result<Vec<SecurityRecord>> {
        let table = self.require_table("stock_list")?;

        self.with_conn(|conn| {
            let sql = format!("SELECT code, name FROM {}", quote_identifier(&table));
            let mut stmt = conn.prepare(&sql)?;

            let records = stmt
                .query_map([], |row| {
                    let code: Option<String> = row.get(0)?;
                    let name: Option<String> = row.get(1)?;
                    Ok(SecurityRecord {
                        code: code.unwrap_or_default(),
                        name: name.unwrap_or_default(),
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            tracing::debug!("Loaded {} securities from stock_list", records.len());
            Ok(records)
        })
    }

    /// Names of all tables and views in the current schema, sorted
    pub fn list_tables(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT table_name FROM information_schema.tables
                 WHERE table_schema = current_schema()
                 ORDER BY table_name",
            )?;

            let tables = stmt
                .query_map([], |row| row.get(0))?
                .collect::<std::result::Result<Vec<String>, _>>()?;

            Ok(tables)
        })
    }

    /// Row count of a table
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        let table = self.require_table(table)?;

        self.with_conn(|conn| {
            let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(&table));
            let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// First `limit` rows of a table, every value rendered as text
    ///
    /// SQL NULL becomes the string `NULL`.
    pub fn sample_rows(&self, table: &str, limit: usize) -> Result<Vec<Vec<String>>> {
        let width = self.table_info(table)?.len();
        let table = self.require_table(table)?;

        self.with_conn(|conn| {
            let sql = format!(
                "SELECT CAST(COLUMNS(*) AS VARCHAR) FROM {} LIMIT {}",
                quote_identifier(&table),
                limit
            );
            let mut stmt = conn.prepare(&sql)?;

            let rows = stmt
                .query_map([], |row| {
                    (0..width)
                        .map(|i| {
                            let value: Option<String> = row.get(i)?;
                            Ok(value.unwrap_or_else(|| "NULL".to_string()))
                        })
                        .collect::<std::result::Result<Vec<_>, duckdb::Error>>()
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

impl Drop for DuckDb {
    fn drop(&mut self) {
        self.close();
    }
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
pub(crate) mod test_support {
    use duckdb::Connection;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Build a store file with the given DDL/DML, closed and ready to be opened read-only
    pub fn create_store(dir: &TempDir, sql: &str) -> PathBuf {
        let path = dir.path().join("stock_data.duckdb");
        write_store(&path, sql);
        path
    }

    pub fn write_store(path: &Path, sql: &str) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(sql).unwrap();
        conn.close().map_err(|(_, e)| e).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::create_store;
    use super::*;
    use tempfile::tempdir;

    const FIXTURE: &str = r#"
        CREATE TABLE stock_list (code VARCHAR PRIMARY KEY, name VARCHAR);
        INSERT INTO stock_list VALUES ('600000.SH', '浦发银行'), ('000001.SZ', '平安银行'), ('430001.BJ', NULL);
        CREATE TABLE indicator_data (code VARCHAR NOT NULL, day DATE NOT NULL, eps DOUBLE DEFAULT 0);
    "#;

    #[test]
    fn test_open_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let result = DuckDb::open(&dir.path().join("absent.duckdb"));
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[test]
    fn test_open_corrupt_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.duckdb");
        std::fs::write(&path, b"definitely not a duckdb file").unwrap();

        let result = DuckDb::open(&path);
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }

    #[test]
    fn test_table_info_maps_not_null_flag() {
        let dir = tempdir().unwrap();
        let db = DuckDb::open(&create_store(&dir, FIXTURE)).unwrap();

        let columns = db.table_info("indicator_data").unwrap();
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["code", "day", "eps"]);

        assert!(!columns[0].nullable);
        assert_eq!(columns[0].null_label(), "NOT NULL");
        assert!(columns[2].nullable);
        assert_eq!(columns[2].null_label(), "NULL");
        assert_eq!(columns[1].declared_type, "DATE");
    }

    #[test]
    fn test_table_info_unknown_table() {
        let dir = tempdir().unwrap();
        let db = DuckDb::open(&create_store(&dir, FIXTURE)).unwrap();

        let result = db.table_info("no_such_table");
        assert!(matches!(result, Err(AppError::TableNotFound(t)) if t == "no_such_table"));
    }

    #[test]
    fn test_load_securities_reads_null_name_as_empty() {
        let dir = tempdir().unwrap();
        let db = DuckDb::open(&create_store(&dir, FIXTURE)).unwrap();

        let records = db.load_securities().unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.contains(&SecurityRecord::new("430001.BJ", "")));
    }

    #[test]
    fn test_list_tables_and_counts() {
        let dir = tempdir().unwrap();
        let db = DuckDb::open(&create_store(&dir, FIXTURE)).unwrap();

        assert_eq!(db.list_tables().unwrap(), ["indicator_data", "stock_list"]);
        assert_eq!(db.count_rows("stock_list").unwrap(), 3);
        assert_eq!(db.count_rows("indicator_data").unwrap(), 0);
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempdir().unwrap();
        let db = DuckDb::open(&create_store(&dir, FIXTURE)).unwrap();

        db.close();
        db.close();
        assert!(db.is_closed());
        assert!(matches!(db.list_tables(), Err(AppError::StoreClosed)));
    }

    #[test]
    fn test_table_lookup_ignores_case() {
        let dir = tempdir().unwrap();
        let db = DuckDb::open(&create_store(&dir, FIXTURE)).unwrap();

        assert_eq!(
            db.resolve_table("Indicator_Data").unwrap().as_deref(),
            Some("indicator_data")
        );
        assert_eq!(db.table_info("Indicator_Data").unwrap().len(), 3);
        assert_eq!(db.count_rows("STOCK_LIST").unwrap(), 3);
    }

    #[test]
    fn test_table_in_other_schema_is_not_found() {
        let dir = tempdir().unwrap();
        let path = create_store(
            &dir,
            "CREATE SCHEMA staging; CREATE TABLE staging.indicator_data (code VARCHAR);",
        );
        let db = DuckDb::open(&path).unwrap();

        assert!(!db.table_exists("indicator_data").unwrap());
        let result = db.table_info("indicator_data");
        assert!(matches!(result, Err(AppError::TableNotFound(t)) if t == "indicator_data"));
        assert!(matches!(db.count_rows("indicator_data"), Err(AppError::TableNotFound(_))));
    }

    #[test]
    fn test_list_tables_includes_views() {
        let dir = tempdir().unwrap();
        let path = create_store(
            &dir,
            &format!("{}\nCREATE VIEW a_shares AS SELECT * FROM stock_list;", FIXTURE),
        );
        let db = DuckDb::open(&path).unwrap();

        assert_eq!(
            db.list_tables().unwrap(),
            ["a_shares", "indicator_data", "stock_list"]
        );
        assert_eq!(db.count_rows("a_shares").unwrap(), 3);
    }

    #[test]
    fn test_sample_rows_renders_text_and_null() {
        let dir = tempdir().unwrap();
        let path = create_store(
            &dir,
            r#"
            CREATE TABLE price_data (code VARCHAR, day DATE, close DOUBLE);
            INSERT INTO price_data VALUES
                ('000001.SZ', DATE '2024-01-02', 9.5),
                ('000001.SZ', DATE '2024-01-03', NULL),
                ('600000.SH', DATE '2024-01-02', 7.25),
                ('600000.SH', DATE '2024-01-03', 7.5);
            "#,
        );
        let db = DuckDb::open(&path).unwrap();

        let rows = db.sample_rows("price_data", 3).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert!(rows.contains(&vec![
            "000001.SZ".to_string(),
            "2024-01-03".to_string(),
            "NULL".to_string(),
        ]));
        assert!(matches!(db.sample_rows("absent", 3), Err(AppError::TableNotFound(_))));
    }

    #[test]
    fn test_connection_released_after_query_error() {
        let dir = tempdir().unwrap();
        let path = create_store(&dir, FIXTURE);

        {
            let db = DuckDb::open(&path).unwrap();
            assert!(matches!(db.table_info("missing"), Err(AppError::TableNotFound(_))));
        }

        // Dropping the failed accessor must free the file for a writer.
        let writer = Connection::open(&path).unwrap();
        writer
            .execute_batch("CREATE TABLE after_error (x INTEGER);")
            .unwrap();
        writer.close().map_err(|(_, e)| e).unwrap();

        let db = DuckDb::open(&path).unwrap();
        assert!(db.table_exists("after_error").unwrap());
    }

    #[test]
    fn test_quoting() {
        assert_eq!(quote_literal("o'neil"), "'o''neil'");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
