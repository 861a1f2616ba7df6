//! Check the indicator table against the financial indicator catalog

use anyhow::Context;
use std::process::ExitCode;
use stock_data_tools::cli::run_tool;
use stock_data_tools::db::duckdb::DuckDb;
use stock_data_tools::services::{SchemaService, INDICATOR_CATALOG};

fn main() -> ExitCode {
    run_tool("verify_indicator_data", |config| {
        let db = DuckDb::open(&config.database.path).context("opening stock store")?;
        let table = &config.verify.indicator_table;

        let report = SchemaService::verify_catalog(&db, table, &INDICATOR_CATALOG)
            .with_context(|| format!("verifying {}", table))?;
        print!("{}", report);

        println!("\nField groups:");
        for coverage in SchemaService::group_coverage(&report, INDICATOR_CATALOG.groups) {
            println!("  {}", coverage);
        }

        db.close();
        Ok(ExitCode::SUCCESS)
    })
}
