use std::path::PathBuf;

use clap::Parser;

use blogcheck_cli::{as_paths, init_tracing, load_config, stdout_reporter, EXIT_USAGE};
use blogcheck_posts::PostChecker;

/// Frontmatter and Markdown checks for blog posts.
#[derive(Parser, Debug)]
#[command(name = "test-posts", version)]
struct Cli {
    /// Config file (default: ./blogcheck.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also require the frontmatter block to parse as YAML
    #[arg(long)]
    strict_yaml: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Posts to check, replacing the configured list
    files: Vec<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut cfg = match load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config error: {e:#}");
            std::process::exit(EXIT_USAGE);
        }
    };
    if cli.strict_yaml {
        cfg.posts.strict_yaml = true;
    }
    let files = if cli.files.is_empty() {
        cfg.post_paths()
    } else {
        as_paths(&cli.files)
    };
    tracing::debug!(count = files.len(), "checking posts");

    let mut reporter = stdout_reporter(&cfg, cli.no_color);
    reporter.title("Blog Post Validation Tests");

    PostChecker::new(&cfg.posts).run(&files, &mut reporter);

    std::process::exit(reporter.summarize());
}
