//! stepwise - a declarative end-to-end test case runner
//!
//! Takes one path: a case file, or a directory searched recursively for
//! `*.e2e.json` files. Prints one line per case and exits non-zero if any
//! case failed.

use std::path::PathBuf;

use clap::Parser;
use stepwise::collab::Runtime;
use stepwise::common::logging;
use stepwise::runner;

#[derive(Parser)]
#[command(name = "stepwise", about = "Declarative end-to-end test case runner")]
#[command(version, long_about = None)]
struct Cli {
    /// Case file, or directory searched recursively for *.e2e.json files
    path: PathBuf,
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    let runtime = Runtime::live();

    match runner::run_path(&cli.path, &runtime) {
        Ok(reports) => {
            for report in &reports {
                runner::print_report(report);
            }
            if !runner::all_passed(&reports) {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
