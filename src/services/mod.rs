//! Services Layer
//!
//! Read-only business logic over the stock store, called by the binaries
//! under `src/bin`.
//!
//! # Architecture
//!
//! ```text
//! bin/* --> Services --> DuckDb (read-only)
//! ```
//!
//! # Services
//!
//! - `exchange` - Ticker suffix classification
//! - `ExportService` - A-share universe export to CSV
//! - `SchemaService` - Table schema verification against a field catalog
//! - `InspectService` - Table listing with columns and row counts

pub mod catalog;
pub mod exchange;
pub mod export_service;
pub mod inspect_service;
pub mod schema_service;

// Re-export commonly used types and services
pub use catalog::{FieldCatalog, FieldGroup, INDICATOR_CATALOG, PRICE_DATA_CATALOG};
pub use exchange::{classify, Exchange};
pub use export_service::{ExchangeCount, ExportResult, ExportService};
pub use inspect_service::{InspectService, TableOverview};
pub use schema_service::{GroupCoverage, SchemaService, VerificationReport};
