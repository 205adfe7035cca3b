use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blogcheck_core::{Config, Reporter};
use tracing_subscriber::EnvFilter;

/// Exit status for configuration and usage errors.
pub const EXIT_USAGE: i32 = 2;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Config from `--config`, else `blogcheck.toml` in the working directory, else defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir().context("current dir")?;
    Config::resolve(&cwd, explicit)
}

pub fn stdout_reporter(cfg: &Config, no_color: bool) -> Reporter<std::io::Stdout> {
    Reporter::stdout(cfg.color_enabled() && !no_color)
}

pub fn as_paths(files: &[String]) -> Vec<PathBuf> {
    files.iter().map(|f| blogcheck_core::expand_path(f)).collect()
}
