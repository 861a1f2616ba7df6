//! Export Shenzhen and Shanghai listings from `stock_list` to CSV

use anyhow::Context;
use std::process::ExitCode;
use stock_data_tools::cli::run_tool;
use stock_data_tools::db::duckdb::DuckDb;
use stock_data_tools::services::ExportService;

fn main() -> ExitCode {
    run_tool("export_a_stocks", |config| {
        let db = DuckDb::open(&config.database.path).context("opening stock store")?;

        let result = ExportService::export_a_shares(&db, &config.export.path, config.export.preview_limit)
            .context("exporting A-share universe")?;
        print!("{}", result);

        db.close();
        Ok(ExitCode::SUCCESS)
    })
}
