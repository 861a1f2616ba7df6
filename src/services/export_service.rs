//! Universe Export Service
//!
//! Reads `stock_list`, reports the exchange distribution and writes the
//! Shenzhen/Shanghai subset to a `code,name` CSV file.

use crate::db::duckdb::models::SecurityRecord;
use crate::db::duckdb::DuckDb;
use crate::error::Result;
use crate::services::exchange::{classify, Exchange};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Number of unfiltered records echoed as code samples
pub const SAMPLE_SIZE: usize = 20;

/// Default number of exported records echoed after the export
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Securities per exchange across the unfiltered universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExchangeCount {
    pub exchange: Exchange,
    pub count: usize,
}

/// Export result
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// Number of rows written (0 when nothing qualified)
    pub exported: usize,
    /// First exported records in sort order
    pub preview: Vec<SecurityRecord>,
    /// Count per exchange, largest first
    pub distribution: Vec<ExchangeCount>,
    /// First records of the unfiltered universe in store order
    pub samples: Vec<SecurityRecord>,
    /// Destination file, only set when a file was written
    pub output: Option<PathBuf>,
}

/// Export service for business logic
pub struct ExportService;

impl ExportService {
    /// Export the A-share universe from the store to `destination`
    pub fn export_a_shares(
        db: &DuckDb,
        destination: &Path,
        preview_limit: usize,
    ) -> Result<ExportResult> {
        info!(
            "ExportService::export_a_shares - {} -> {}",
            db.path().display(),
            destination.display()
        );

        let universe = db.load_securities()?;
        Self::export_universe(&universe, destination, preview_limit)
    }

    /// Export an already loaded universe
    pub fn export_universe(
        universe: &[SecurityRecord],
        destination: &Path,
        preview_limit: usize,
    ) -> Result<ExportResult> {
        let distribution = Self::exchange_distribution(universe);
        let samples = universe.iter().take(SAMPLE_SIZE).cloned().collect();

        let selected = Self::select_a_shares(universe);

        // An empty selection leaves any existing file untouched.
        let output = if selected.is_empty() {
            info!("No A-share securities found, nothing written");
            None
        } else {
            write_csv(&selected, destination)?;
            info!(
                "Exported {} A-share securities to {}",
                selected.len(),
                destination.display()
            );
            Some(destination.to_path_buf())
        };

        Ok(ExportResult {
            exported: selected.len(),
            preview: selected.iter().take(preview_limit).cloned().collect(),
            distribution,
            samples,
            output,
        })
    }

    /// Count securities per exchange, largest first, ties in enumeration order
    pub fn exchange_distribution(universe: &[SecurityRecord]) -> Vec<ExchangeCount> {
        let mut counts = [0usize; 4];
        for record in universe {
            counts[classify(&record.code) as usize] += 1;
        }

        let mut distribution: Vec<ExchangeCount> = Exchange::ALL
            .iter()
            .zip(counts)
            .map(|(&exchange, count)| ExchangeCount { exchange, count })
            .collect();

        // Stable sort keeps enumeration order among equal counts.
        distribution.sort_by(|a, b| b.count.cmp(&a.count));
        distribution
    }

    /// Shenzhen and Shanghai records, sorted by code byte-wise
    pub fn select_a_shares(universe: &[SecurityRecord]) -> Vec<SecurityRecord> {
        let mut selected: Vec<SecurityRecord> = universe
            .iter()
            .filter(|r| classify(&r.code).is_a_share())
            .cloned()
            .collect();

        selected.sort_by(|a, b| a.code.as_bytes().cmp(b.code.as_bytes()));
        selected
    }
}

/// Write records as `code,name` CSV, replacing the destination
fn write_csv(records: &[SecurityRecord], destination: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(destination)?;

    wtr.write_record(["code", "name"])?;
    for record in records {
        wtr.write_record([record.code.as_str(), record.name.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

impl fmt::Display for ExportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Code samples ===")?;
        for record in &self.samples {
            writeln!(f, "{} - {}", record.code, record.name)?;
        }

        writeln!(f, "\n=== Exchange distribution ===")?;
        for entry in &self.distribution {
            writeln!(f, "{}: {}", entry.exchange, entry.count)?;
        }

        writeln!(f, "\n=== A-share export ===")?;
        match &self.output {
            Some(path) => {
                writeln!(
                    f,
                    "Exported {} A-share securities to {}",
                    self.exported,
                    path.display()
                )?;
                writeln!(f, "\nFirst {} A-share securities:", self.preview.len())?;
                for record in &self.preview {
                    writeln!(f, "{} - {}", record.code, record.name)?;
                }
            }
            None => writeln!(f, "No A-share securities found")?,
        }

        Ok(())
    }
}
