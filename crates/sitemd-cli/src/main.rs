use sitemd_core::logging;

mod cli;

use crate::cli::{fatal_line, CliCommand};

#[tokio::main]
async fn main() {
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
    }

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("{}", fatal_line(&err));
        std::process::exit(1);
    }
}
