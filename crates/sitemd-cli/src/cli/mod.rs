//! CLI for sitemd.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sitemd_core::config::{self, SitemdConfig};
use sitemd_core::url_model::{Layout, PrefixPolicy};
use std::path::{Path, PathBuf};

use commands::{run_crawl, run_page, CrawlArgs};

/// Top-level CLI for sitemd.
#[derive(Debug, Parser)]
#[command(name = "sitemd")]
#[command(about = "sitemd: crawl a site section into a Markdown directory tree", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config path.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Crawl from a start URL and save every page as Markdown under OUTPUT_DIR.
    Crawl {
        /// Start URL; only pages under its path are followed.
        url: String,

        /// Root directory of the Markdown tree (created if missing).
        output_dir: PathBuf,

        /// Maximum link depth from the start URL (default from config, 3).
        #[arg(short, long, value_name = "N")]
        depth: Option<usize>,

        /// Suppress per-page fetch progress.
        #[arg(short, long)]
        quiet: bool,

        /// How the start URL's path prefix is treated in output paths.
        #[arg(long, value_enum)]
        prefix_policy: Option<PrefixPolicyArg>,

        /// Directory layout for deep pages.
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
    },

    /// Save a single page interactively, prompting for URL and filename.
    Page {
        /// Suppress fetch progress.
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
pub enum PrefixPolicyArg {
    /// Drop the start URL's path; the start page becomes `index.md` at the root.
    StripStart,
    /// Keep every path component of each URL.
    FullPath,
}

impl From<PrefixPolicyArg> for PrefixPolicy {
    fn from(arg: PrefixPolicyArg) -> Self {
        match arg {
            PrefixPolicyArg::StripStart => PrefixPolicy::StripStart,
            PrefixPolicyArg::FullPath => PrefixPolicy::FullPath,
        }
    }
}

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
pub enum LayoutArg {
    /// First component as directory, last as file.
    Flat,
    /// One directory per path component.
    Nested,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Flat => Layout::Flat,
            LayoutArg::Nested => Layout::Nested,
        }
    }
}

/// Operator line for an error that ends the run.
pub fn fatal_line(err: &anyhow::Error) -> String {
    format!("[ERROR] {:#}", err)
}

fn load_config(path: Option<&Path>) -> Result<SitemdConfig> {
    match path {
        Some(path) => config::load_from_path(path),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Crawl {
                url,
                output_dir,
                depth,
                quiet,
                prefix_policy,
                layout,
            } => {
                let args = CrawlArgs {
                    url,
                    output_dir,
                    depth,
                    quiet,
                    prefix_policy: prefix_policy.map(Into::into),
                    layout: layout.map(Into::into),
                };
                run_crawl(&cfg, args).await?;
            }
            CliCommand::Page { quiet } => run_page(&cfg, quiet).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
