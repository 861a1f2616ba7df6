//! Database access

pub mod duckdb;
