use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::url_model::{Layout, MapOptions, PrefixPolicy};

/// Default maximum link depth followed from the start URL.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Retry policy parameters for page fetches (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per page (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/sitemd/config.toml`.
///
/// Missing keys take their default values, so a partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemdConfig {
    /// Maximum link depth followed from the start URL (`--depth` overrides).
    pub max_depth: usize,
    /// "strip-start" (default) or "full-path".
    pub prefix_policy: PrefixPolicy,
    /// "flat" (default) or "nested".
    pub layout: Layout,
    /// Upper bound on pages fetched in one crawl.
    pub max_pages: usize,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per request, in seconds.
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
}

impl Default for SitemdConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prefix_policy: PrefixPolicy::default(),
            layout: Layout::default(),
            max_pages: 500,
            user_agent: concat!("sitemd/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 60,
            retry: None,
        }
    }
}

impl SitemdConfig {
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            prefix_policy: self.prefix_policy,
            layout: self.layout,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sitemd")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SitemdConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SitemdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file (e.g. `--config`).
pub fn load_from_path(path: &Path) -> Result<SitemdConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: SitemdConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Everything one crawl run needs, fixed before the crawl starts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub start_url: String,
    pub output_dir: PathBuf,
    pub max_depth: usize,
    /// Per-page progress output from the crawler.
    pub verbose: bool,
    pub map: MapOptions,
}

impl RunConfig {
    /// Run settings from the file config; callers override fields from flags.
    pub fn new(start_url: impl Into<String>, output_dir: impl Into<PathBuf>, cfg: &SitemdConfig) -> Self {
        Self {
            start_url: start_url.into(),
            output_dir: output_dir.into(),
            max_depth: cfg.max_depth,
            verbose: true,
            map: cfg.map_options(),
        }
    }
}

/// Problems that stop a run before any crawling starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Output directory '{}' is not writable. Please check permissions.", .path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to create or access output directory '{}': {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Name of the file used to check that the output directory is writable.
const WRITE_TEST_FILE: &str = ".write_test";

/// Creates `dir` if needed and proves it is writable by creating and
/// removing a `.write_test` file.
pub fn ensure_output_dir(dir: &Path) -> Result<(), ConfigError> {
    let classify = |source: io::Error| {
        if source.kind() == io::ErrorKind::PermissionDenied {
            ConfigError::OutputNotWritable {
                path: dir.to_path_buf(),
                source,
            }
        } else {
            ConfigError::OutputUnavailable {
                path: dir.to_path_buf(),
                source,
            }
        }
    };

    fs::create_dir_all(dir).map_err(classify)?;
    let test_file = dir.join(WRITE_TEST_FILE);
    fs::File::create(&test_file).map_err(classify)?;
    fs::remove_file(&test_file).map_err(classify)?;
    Ok(())
}
