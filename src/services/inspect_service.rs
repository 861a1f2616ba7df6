//! Table overview: every table and view with its columns and row count,
//! plus a few sample rows from the market data tables

use crate::db::duckdb::models::ColumnDescriptor;
use crate::db::duckdb::DuckDb;
use crate::error::Result;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Rows shown for each sampled table
pub const SAMPLE_ROWS: usize = 3;

/// Tables whose name contains one of these (case-insensitive) get sample rows
pub const SAMPLE_KEYWORDS: &[&str] = &["price", "indicator", "market"];

#[derive(Debug, Clone, Serialize)]
pub struct TableOverview {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub row_count: i64,
    /// Rendered values, empty for tables that are not sampled
    pub samples: Vec<Vec<String>>,
}

pub struct InspectService;

impl InspectService {
    pub fn inspect_tables(db: &DuckDb) -> Result<Vec<TableOverview>> {
        let tables = db.list_tables()?;
        info!("InspectService::inspect_tables - {} tables", tables.len());

        tables
            .into_iter()
            .map(|name| {
                let samples = if Self::is_sampled(&name) {
                    db.sample_rows(&name, SAMPLE_ROWS)?
                } else {
                    Vec::new()
                };

                Ok(TableOverview {
                    columns: db.table_info(&name)?,
                    row_count: db.count_rows(&name)?,
                    samples,
                    name,
                })
            })
            .collect()
    }

    fn is_sampled(table: &str) -> bool {
        let lower = table.to_lowercase();
        SAMPLE_KEYWORDS.iter().any(|k| lower.contains(k))
    }
}

impl fmt::Display for TableOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table: {}", self.name)?;
        writeln!(f, "Columns:")?;
        for column in &self.columns {
            writeln!(f, "  {} ({})", column.name, column.declared_type)?;
        }
        writeln!(f, "Rows: {}", self.row_count)?;

        if !self.samples.is_empty() {
            writeln!(f, "Sample rows:")?;
            for row in &self.samples {
                writeln!(f, "  {}", row.join(" | "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::duckdb::test_support::create_store;
    use tempfile::tempdir;

    #[test]
    fn test_inspect_tables() {
        let dir = tempdir().unwrap();
        let path = create_store(
            &dir,
            r#"
            CREATE TABLE stock_list (code VARCHAR, name VARCHAR);
            INSERT INTO stock_list VALUES ('000001.SZ', 'A'), ('600000.SH', 'B');
            CREATE TABLE price_data (code VARCHAR, day DATE, close DOUBLE);
            INSERT INTO price_data VALUES
                ('000001.SZ', DATE '2024-01-02', 9.5),
                ('000001.SZ', DATE '2024-01-03', 9.75),
                ('600000.SH', DATE '2024-01-02', 7.25),
                ('600000.SH', DATE '2024-01-03', 7.5);
            CREATE VIEW a_shares AS SELECT * FROM stock_list;
            "#,
        );
        let db = DuckDb::open(&path).unwrap();

        let overview = InspectService::inspect_tables(&db).unwrap();

        let names: Vec<_> = overview.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["a_shares", "price_data", "stock_list"]);

        assert_eq!(overview[0].row_count, 2);
        assert!(overview[0].samples.is_empty());

        assert_eq!(overview[1].columns.len(), 3);
        assert_eq!(overview[1].row_count, 4);
        assert_eq!(overview[1].samples.len(), SAMPLE_ROWS);
        assert!(overview[1].samples.iter().all(|r| r.len() == 3));

        assert!(overview[2].samples.is_empty());
        assert!(overview[2].to_string().contains("  code (VARCHAR)"));
        assert!(!overview[2].to_string().contains("Sample rows:"));
    }

    #[test]
    fn test_sample_rows_rendered() {
        let dir = tempdir().unwrap();
        let path = create_store(
            &dir,
            r#"
            CREATE TABLE Market_Snapshot (code VARCHAR, last DOUBLE);
            INSERT INTO Market_Snapshot VALUES ('000001.SZ', NULL);
            "#,
        );
        let db = DuckDb::open(&path).unwrap();

        let overview = InspectService::inspect_tables(&db).unwrap();

        assert_eq!(overview[0].samples, [vec!["000001.SZ".to_string(), "NULL".to_string()]]);
        let text = overview[0].to_string();
        assert!(text.contains("Sample rows:\n  000001.SZ | NULL\n"));
    }

    #[test]
    fn test_empty_store() {
        let dir = tempdir().unwrap();
        let path = create_store(&dir, "SELECT 1;");
        let db = DuckDb::open(&path).unwrap();

        assert!(InspectService::inspect_tables(&db).unwrap().is_empty());
    }
}
