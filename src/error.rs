//! Application error types

use std::path::PathBuf;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store unavailable at {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: duckdb::Error,
    },

    #[error("Store connection already closed")]
    StoreClosed,

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Query failed: {0}")]
    QueryFailure(#[from] duckdb::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Stable machine-readable code, used in log lines
    pub fn code(&self) -> &'static str {
        match self {
            AppError::StoreUnavailable { .. } => "STORE_UNAVAILABLE",
            AppError::StoreClosed => "STORE_CLOSED",
            AppError::TableNotFound(_) => "TABLE_NOT_FOUND",
            AppError::QueryFailure(_) => "QUERY_FAILURE",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
