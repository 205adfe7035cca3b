use std::io::Write;
use std::path::Path;

use blogcheck_core::{eval_all, Check, CheckError, PostsConfig, Reporter};

use crate::input::{filename_of, PostInput};
use crate::rules::post_rules;

pub struct PostChecker {
    rules: Vec<Box<dyn Check<PostInput>>>,
}

impl PostChecker {
    pub fn new(cfg: &PostsConfig) -> Self {
        Self {
            rules: post_rules(&cfg.required_fields, cfg.min_lines, cfg.strict_yaml),
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Checks each existing file; missing ones are warned about and skipped.
    pub fn run<W: Write, P: AsRef<Path>>(&self, files: &[P], reporter: &mut Reporter<W>) {
        for path in files {
            let path = path.as_ref();
            if !path.exists() {
                tracing::debug!(path = %path.display(), "post missing; skipped");
                reporter.warn(&format!("File not found: {}", path.display()));
                continue;
            }
            self.run_file(path, reporter);
        }
    }

    pub fn run_file<W: Write>(&self, path: &Path, reporter: &mut Reporter<W>) {
        let filename = filename_of(path);
        reporter.section(&format!("Testing: {filename}"));
        let input = match PostInput::load(path) {
            Ok(input) => input,
            Err(CheckError::NotFound(_)) => {
                reporter.warn(&format!("File not found: {}", path.display()));
                return;
            }
            Err(e) => {
                reporter.record_fail(&format!("{filename}: File readable"), &e.to_string());
                return;
            }
        };
        let results = eval_all(&self.rules, &input);
        reporter.record_all(&results);
    }
}
