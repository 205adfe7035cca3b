use std::io::Write;
use std::path::Path;

use blogcheck_core::{eval_all, Check, CheckError, InstallConfig, Reporter};

use crate::input::{display_name, ScriptInput};
use crate::rules::{
    command_rules, quality_rules, ExecutableRule, LineEndingRule, ShebangRule, SyntaxRule,
};

pub struct Section {
    pub title: &'static str,
    pub checks: Vec<Box<dyn Check<ScriptInput>>>,
}

/// Install-script checker: an existence gate followed by three ordered sections.
pub struct InstallChecker {
    cfg: InstallConfig,
}

impl InstallChecker {
    pub fn new(cfg: InstallConfig) -> Self {
        Self { cfg }
    }

    pub fn sections(&self) -> Vec<Section> {
        vec![
            Section {
                title: "Basic File Tests",
                checks: vec![
                    Box::new(ShebangRule {
                        interpreter: self.cfg.interpreter.clone(),
                    }),
                    Box::new(ExecutableRule),
                    Box::new(SyntaxRule {
                        shell: self.cfg.shell.clone(),
                        timeout_secs: self.cfg.syntax_timeout_secs,
                    }),
                    Box::new(LineEndingRule),
                ],
            },
            Section {
                title: "Command Validation Tests",
                checks: command_rules(&self.cfg.required_packages),
            },
            Section {
                title: "Script Quality Tests",
                checks: quality_rules(),
            },
        ]
    }

    /// Runs every check against `path`, recording each result on `reporter`.
    ///
    /// A missing or unreadable script records one failure and stops.
    pub fn run<W: Write>(&self, path: &Path, reporter: &mut Reporter<W>) {
        let name = display_name(path);
        let sections = self.sections();
        // the existence gate prints under the first section
        reporter.section(sections[0].title);

        let input = match ScriptInput::load(path) {
            Ok(input) => {
                reporter.record_pass(&format!("{name} exists and is readable"));
                input
            }
            Err(CheckError::NotFound(_)) => {
                tracing::debug!(path = %path.display(), "script missing");
                reporter.record_fail(&format!("{name} exists"), "File not found");
                return;
            }
            Err(e) => {
                reporter.record_fail(&format!("{name} exists and is readable"), &e.to_string());
                return;
            }
        };

        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                reporter.section(section.title);
            }
            let results = eval_all(&section.checks, &input);
            reporter.record_all(&results);
        }
    }
}
