//! List every table in the store with its columns and row count

use anyhow::Context;
use std::process::ExitCode;
use stock_data_tools::cli::run_tool;
use stock_data_tools::db::duckdb::DuckDb;
use stock_data_tools::services::InspectService;

fn main() -> ExitCode {
    run_tool("check_tables", |config| {
        let db = DuckDb::open(&config.database.path).context("opening stock store")?;

        let tables = InspectService::inspect_tables(&db).context("inspecting tables")?;
        println!("Tables in {}:", db.path().display());
        for table in &tables {
            println!();
            print!("{}", table);
        }

        db.close();
        Ok(ExitCode::SUCCESS)
    })
}
