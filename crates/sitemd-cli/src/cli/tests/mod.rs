//! CLI parse and error-line tests.

use super::{fatal_line, Cli, CliCommand, LayoutArg, PrefixPolicyArg};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

mod crawl;
mod page;
