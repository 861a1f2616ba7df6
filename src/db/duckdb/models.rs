//! DuckDB data models

use serde::Serialize;

/// One row of `stock_list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityRecord {
    pub code: String,
    pub name: String,
}

impl SecurityRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Column metadata as reported by `pragma_table_info`
///
/// Built at the store boundary; `nullable` is derived once from the raw
/// not-null flag so nothing downstream sees the integer encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub ordinal: i64,
    pub name: String,
    pub declared_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl ColumnDescriptor {
    /// Display label for the nullability flag
    pub fn null_label(&self) -> &'static str {
        if self.nullable {
            "NULL"
        } else {
            "NOT NULL"
        }
    }
}
