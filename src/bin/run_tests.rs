//! Run the configured test scripts and summarize pass/fail

use std::process::ExitCode;
use stock_data_tools::cli::run_tool;
use stock_data_tools::harness::TestHarness;

fn main() -> ExitCode {
    run_tool("run_tests", |config| {
        let summary = TestHarness::from_config(&config.harness).run();
        print!("\n{}", summary);

        Ok(ExitCode::from(summary.exit_code() as u8))
    })
}
