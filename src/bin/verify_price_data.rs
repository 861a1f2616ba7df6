//! Check the price table against the daily price catalog, with group coverage

use anyhow::Context;
use std::process::ExitCode;
use stock_data_tools::cli::run_tool;
use stock_data_tools::db::duckdb::DuckDb;
use stock_data_tools::services::{SchemaService, PRICE_DATA_CATALOG};

fn main() -> ExitCode {
    run_tool("verify_price_data", |config| {
        let db = DuckDb::open(&config.database.path).context("opening stock store")?;
        let table = &config.verify.price_table;

        let report = SchemaService::verify_catalog(&db, table, &PRICE_DATA_CATALOG)
            .with_context(|| format!("verifying {}", table))?;
        print!("{}", report);

        println!("\nField groups:");
        for coverage in SchemaService::group_coverage(&report, PRICE_DATA_CATALOG.groups) {
            println!("  {}", coverage);
        }

        db.close();
        Ok(ExitCode::SUCCESS)
    })
}
