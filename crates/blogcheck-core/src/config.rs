use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "blogcheck.toml";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default)]
    pub posts: PostsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstallConfig {
    pub script: String,
    /// Substring the shebang line must contain.
    pub interpreter: String,
    /// Shell used for the parse-only syntax check.
    pub shell: String,
    pub syntax_timeout_secs: u64,
    pub required_packages: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            script: "tools/install.sh".to_string(),
            interpreter: "bash".to_string(),
            shell: "bash".to_string(),
            syntax_timeout_secs: 5,
            required_packages: [
                "git",
                "curl",
                "build-essential",
                "libssl-dev",
                "libreadline-dev",
                "zlib1g-dev",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostsConfig {
    pub files: Vec<String>,
    pub required_fields: Vec<String>,
    pub min_lines: usize,
    pub strict_yaml: bool,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            files: vec![
                "_posts/2025-9-15-Linux-usermod.md".to_string(),
                "_posts/2025-9-20-Poetry.md".to_string(),
            ],
            required_fields: ["layout:", "title:", "date:", "categories:", "tags:"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_lines: 10,
            strict_yaml: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
        Ok(cfg)
    }

    /// Loads `explicit` if given, else `blogcheck.toml` under `dir` when present, else defaults.
    pub fn resolve(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            tracing::debug!(path = %p.display(), "loading explicit config");
            return Self::load_from(p);
        }
        let p = Self::config_path(dir);
        if p.exists() {
            tracing::debug!(path = %p.display(), "loading config");
            Self::load_from(&p)
        } else {
            tracing::debug!("no config file; using defaults");
            Ok(Self::default())
        }
    }

    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join(DEFAULT_CONFIG_FILE)
    }

    pub fn script_path(&self) -> PathBuf {
        expand_path(&self.install.script)
    }

    pub fn post_paths(&self) -> Vec<PathBuf> {
        self.posts.files.iter().map(|f| expand_path(f)).collect()
    }

    /// Color stays off when `NO_COLOR` is set, whatever the file says.
    pub fn color_enabled(&self) -> bool {
        self.output.color && std::env::var_os("NO_COLOR").is_none()
    }
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}
