//! Schema Verification Service
//!
//! Checks a table's physical columns against a required field catalog.
//! Missing fields are a finding carried in the report, not an error.

use crate::db::duckdb::models::ColumnDescriptor;
use crate::db::duckdb::DuckDb;
use crate::error::Result;
use crate::services::catalog::{FieldCatalog, FieldGroup};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{info, warn};

/// Verification report
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub table: String,
    /// Introspected columns in ordinal order
    pub columns: Vec<ColumnDescriptor>,
    pub total_columns: usize,
    /// Catalog fields found in the table, in catalog order
    pub present: Vec<String>,
    /// Catalog fields absent from the table, in catalog order
    pub missing: Vec<String>,
    /// The catalog the table was checked against
    pub catalog: Vec<String>,
    /// Catalog name and version, when checked against a named catalog
    pub catalog_label: Option<String>,
}

impl VerificationReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// How much of one field group a table carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCoverage {
    pub group: String,
    pub present: Vec<String>,
    pub total: usize,
}

/// Schema service for business logic
pub struct SchemaService;

impl SchemaService {
    /// Verify `table` against `catalog`
    pub fn verify(db: &DuckDb, table: &str, catalog: &[&str]) -> Result<VerificationReport> {
        info!("SchemaService::verify - {} against {} fields", table, catalog.len());

        let columns = db.table_info(table)?;
        let report = Self::check_columns(table, columns, catalog);

        if report.is_complete() {
            info!("{}: all {} catalog fields present", table, catalog.len());
        } else {
            warn!("{}: {} catalog fields missing", table, report.missing.len());
        }

        Ok(report)
    }

    /// Verify `table` against a versioned catalog
    pub fn verify_catalog(db: &DuckDb, table: &str, catalog: &FieldCatalog) -> Result<VerificationReport> {
        let mut report = Self::verify(db, table, catalog.fields)?;
        report.catalog_label = Some(catalog.label());
        Ok(report)
    }

    /// Build a report from already introspected columns
    pub fn check_columns(
        table: &str,
        columns: Vec<ColumnDescriptor>,
        catalog: &[&str],
    ) -> VerificationReport {
        let declared: HashSet<&str> = columns.iter().map(|c| c.name.as_str()).collect();

        let (present, missing): (Vec<&str>, Vec<&str>) =
            catalog.iter().copied().partition(|field| declared.contains(field));

        VerificationReport {
            table: table.to_string(),
            total_columns: columns.len(),
            present: present.into_iter().map(String::from).collect(),
            missing: missing.into_iter().map(String::from).collect(),
            catalog: catalog.iter().map(|f| f.to_string()).collect(),
            catalog_label: None,
            columns,
        }
    }

    /// Per-group coverage of a verified table
    pub fn group_coverage(report: &VerificationReport, groups: &[FieldGroup]) -> Vec<GroupCoverage> {
        let declared: HashSet<&str> = report.columns.iter().map(|c| c.name.as_str()).collect();

        groups
            .iter()
            .map(|group| GroupCoverage {
                group: group.name.to_string(),
                present: group
                    .fields
                    .iter()
                    .filter(|f| declared.contains(*f))
                    .map(|f| f.to_string())
                    .collect(),
                total: group.fields.len(),
            })
            .collect()
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} structure:", self.table)?;
        if let Some(label) = &self.catalog_label {
            writeln!(f, "Catalog: {}", label)?;
        }
        writeln!(f, "Column count: {}", self.total_columns)?;
        writeln!(f, "\nColumns:")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for (i, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "{:2}. {:<30} {:<15} {}",
                i + 1,
                column.name,
                column.declared_type,
                column.null_label()
            )?;
        }

        writeln!(f, "\nRequired fields:")?;
        writeln!(f, "{}", "-".repeat(50))?;
        let missing: HashSet<&str> = self.missing.iter().map(String::as_str).collect();
        for field in &self.catalog {
            if missing.contains(field.as_str()) {
                writeln!(f, "✗ {} (missing)", field)?;
            } else {
                writeln!(f, "✓ {}", field)?;
            }
        }

        if self.missing.is_empty() {
            writeln!(f, "\nAll {} required fields present", self.present.len())
        } else {
            writeln!(f, "\n{} required fields missing: {:?}", self.missing.len(), self.missing)
        }
    }
}

impl fmt::Display for GroupCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:?} ({}/{})",
            self.group,
            self.present,
            self.present.len(),
            self.total
        )
    }
}
