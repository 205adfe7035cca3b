use std::path::PathBuf;

use clap::Parser;

use blogcheck_cli::{init_tracing, load_config, stdout_reporter, EXIT_USAGE};
use blogcheck_core::expand_path;
use blogcheck_install::InstallChecker;

/// Structural checks for the rbenv install script.
#[derive(Parser, Debug)]
#[command(name = "test-install", version)]
struct Cli {
    /// Config file (default: ./blogcheck.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Script to check, overriding the config
    #[arg(long)]
    script: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let cfg = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error: {e:#}");
            std::process::exit(EXIT_USAGE);
        }
    };
    let script = match &cli.script {
        Some(s) => expand_path(s),
        None => cfg.script_path(),
    };
    tracing::debug!(script = %script.display(), "checking install script");

    let mut reporter = stdout_reporter(&cfg, cli.no_color);
    reporter.title("Installation Script Tests (install.sh)");

    InstallChecker::new(cfg.install.clone()).run(&script, &mut reporter);

    std::process::exit(reporter.summarize());
}
