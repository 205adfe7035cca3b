use std::sync::LazyLock;

use blogcheck_core::{shell_syntax_check, Check, CheckResult};
use regex::Regex;

use crate::input::ScriptInput;

static RE_RUBY_INSTALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rbenv install ([0-9]+\.[0-9]+\.[0-9]+)").unwrap());

static RE_RUBY_GLOBAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rbenv global ([0-9]+\.[0-9]+\.[0-9]+)").unwrap());

static RE_APT_INSTALL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sudo apt install.*").unwrap());

pub struct ShebangRule {
    pub interpreter: String,
}

impl Check<ScriptInput> for ShebangRule {
    fn id(&self) -> &str {
        "install/shebang"
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        let first = input.first_line();
        if first.starts_with("#!") && first.contains(self.interpreter.as_str()) {
            CheckResult::pass(
                self.id(),
                format!("{} has valid {} shebang", input.name, self.interpreter),
            )
        } else {
            CheckResult::fail(
                self.id(),
                format!("{} has shebang", input.name),
                format!("Missing or invalid: '{first}'"),
            )
        }
    }
}

/// Advisory only: always passes, with a note when the mode bits lack `x`.
pub struct ExecutableRule;

impl Check<ScriptInput> for ExecutableRule {
    fn id(&self) -> &str {
        "install/executable"
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        if input.executable {
            CheckResult::pass(self.id(), format!("{} is executable", input.name))
        } else {
            CheckResult::pass(
                self.id(),
                format!("{} executability check (not required)", input.name),
            )
            .with_note(format!(
                "{0} is not executable (consider: chmod +x {0})",
                input.name
            ))
        }
    }
}

pub struct SyntaxRule {
    pub shell: String,
    pub timeout_secs: u64,
}

impl Check<ScriptInput> for SyntaxRule {
    fn id(&self) -> &str {
        "install/syntax"
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        let label = format!("{} syntax check", input.name);
        match shell_syntax_check(&self.shell, &input.path, self.timeout_secs) {
            Ok(out) if out.success => {
                CheckResult::pass(self.id(), format!("{} has no syntax errors", input.name))
            }
            Ok(out) => CheckResult::fail(self.id(), label, format!("Syntax errors: {}", out.stderr)),
            Err(e) => CheckResult::fail(self.id(), label, e.to_string()),
        }
    }
}

pub struct LineEndingRule;

impl Check<ScriptInput> for LineEndingRule {
    fn id(&self) -> &str {
        "install/line-endings"
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        if input.content.contains("\r\n") {
            CheckResult::fail(
                self.id(),
                format!("{} line endings", input.name),
                "File has Windows (CRLF) line endings",
            )
        } else {
            CheckResult::pass(self.id(), format!("{} has Unix line endings (LF)", input.name))
        }
    }
}

/// Passes when `pattern` matches anywhere in the script.
pub struct PatternRule {
    pub id: &'static str,
    pub pattern: Regex,
    /// Label suffix on pass, after the script name.
    pub found: &'static str,
    /// Label suffix on failure.
    pub short: &'static str,
    pub detail: &'static str,
}

impl PatternRule {
    pub(crate) fn new(
        id: &'static str,
        pattern: &str,
        found: &'static str,
        short: &'static str,
        detail: &'static str,
    ) -> Self {
        Self {
            id,
            // patterns are compile-time literals in this crate
            pattern: Regex::new(pattern).unwrap(),
            found,
            short,
            detail,
        }
    }
}

impl Check<ScriptInput> for PatternRule {
    fn id(&self) -> &str {
        self.id
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        if self.pattern.is_match(&input.content) {
            CheckResult::pass(self.id, format!("{} {}", input.name, self.found))
        } else {
            CheckResult::fail(self.id, format!("{} {}", input.name, self.short), self.detail)
        }
    }
}

pub struct RequiredPackagesRule {
    pub packages: Vec<String>,
}

impl Check<ScriptInput> for RequiredPackagesRule {
    fn id(&self) -> &str {
        "install/dependencies"
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        let label = format!("{} dependencies", input.name);
        let Some(line) = RE_APT_INSTALL_LINE.find(&input.content) else {
            return CheckResult::fail(self.id(), label, "No 'apt install' command found");
        };
        let missing: Vec<&str> = self
            .packages
            .iter()
            .filter(|p| !line.as_str().contains(p.as_str()))
            .map(|p| p.as_str())
            .collect();
        if missing.is_empty() {
            CheckResult::pass(self.id(), format!("{} installs required dependencies", input.name))
        } else {
            CheckResult::fail(self.id(), label, format!("Missing packages: {}", missing.join(", ")))
        }
    }
}

pub fn installed_version(content: &str) -> Option<&str> {
    RE_RUBY_INSTALL
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn global_version(content: &str) -> Option<&str> {
    RE_RUBY_GLOBAL
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub struct RubyInstallRule;

impl Check<ScriptInput> for RubyInstallRule {
    fn id(&self) -> &str {
        "install/ruby-install"
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        match installed_version(&input.content) {
            Some(v) => CheckResult::pass(
                self.id(),
                format!("{} installs Ruby version ({v})", input.name),
            ),
            None => CheckResult::fail(
                self.id(),
                format!("{} Ruby install", input.name),
                "Missing 'rbenv install' command",
            ),
        }
    }
}

pub struct VersionConsistencyRule;

impl Check<ScriptInput> for VersionConsistencyRule {
    fn id(&self) -> &str {
        "install/version-consistency"
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        match (
            installed_version(&input.content),
            global_version(&input.content),
        ) {
            (Some(i), Some(g)) if i == g => CheckResult::pass(
                self.id(),
                format!("{}: Ruby version consistent ({i})", input.name),
            ),
            (Some(i), Some(g)) => CheckResult::fail(
                self.id(),
                format!("{} version consistency", input.name),
                format!("Install {i} != global {g}"),
            ),
            _ => CheckResult::fail(
                self.id(),
                format!("{} version check", input.name),
                "Could not extract versions",
            ),
        }
    }
}

/// First-occurrence offset of `before` must precede that of `after`.
///
/// An absent command has offset -1, so a missing `before` always precedes.
pub struct OrderRule {
    pub id: &'static str,
    pub before: &'static str,
    pub after: &'static str,
    pub desc: &'static str,
}

impl Check<ScriptInput> for OrderRule {
    fn id(&self) -> &str {
        self.id
    }

    fn eval(&self, input: &ScriptInput) -> CheckResult {
        let before = input.offset_of(self.before);
        let after = input.offset_of(self.after);
        tracing::debug!(before, after, desc = self.desc, "order");
        if before < after {
            CheckResult::pass(self.id, format!("{}: {}", input.name, self.desc))
        } else {
            CheckResult::fail(self.id, format!("{}: Command order", input.name), self.desc)
        }
    }
}

pub fn order_rules() -> Vec<OrderRule> {
    vec![
        OrderRule {
            id: "install/order-apt",
            before: "sudo apt update",
            after: "sudo apt install",
            desc: "apt update runs before apt install",
        },
        OrderRule {
            id: "install/order-clone-path",
            before: "git clone https://github.com/rbenv/rbenv",
            after: "export PATH=\"$HOME/.rbenv/bin:$PATH\"",
            desc: "rbenv cloned before PATH setup",
        },
        OrderRule {
            id: "install/order-path-init",
            before: "export PATH=\"$HOME/.rbenv/bin:$PATH\"",
            after: "rbenv init",
            desc: "PATH setup before rbenv init",
        },
        OrderRule {
            id: "install/order-source-install",
            before: "source ~/.bashrc",
            after: "rbenv install",
            desc: ".bashrc sourced before rbenv install",
        },
    ]
}

pub fn command_rules(packages: &[String]) -> Vec<Box<dyn Check<ScriptInput>>> {
    vec![
        Box::new(PatternRule::new(
            "install/apt-update",
            r"sudo apt update",
            "updates package lists (sudo apt update)",
            "apt update",
            "Missing 'sudo apt update' command",
        )),
        Box::new(RequiredPackagesRule {
            packages: packages.to_vec(),
        }),
        Box::new(PatternRule::new(
            "install/rbenv-clone",
            r"git clone.*rbenv/rbenv.*~/.rbenv",
            "clones rbenv repository",
            "rbenv clone",
            "Missing rbenv clone command",
        )),
        Box::new(PatternRule::new(
            "install/ruby-build-clone",
            r"git clone.*rbenv/ruby-build.*~/.rbenv/plugins/ruby-build",
            "clones ruby-build plugin",
            "ruby-build",
            "Missing ruby-build clone command",
        )),
        Box::new(PatternRule::new(
            "install/path-export",
            r"export PATH=.*\.rbenv/bin.*>>.*\.bashrc",
            "adds rbenv to PATH in .bashrc",
            "PATH",
            "Missing PATH export to .bashrc",
        )),
        Box::new(PatternRule::new(
            "install/rbenv-init",
            r"eval.*rbenv init.*>>.*\.bashrc",
            "adds rbenv init to .bashrc",
            "rbenv init",
            "Missing 'rbenv init' in .bashrc",
        )),
        Box::new(PatternRule::new(
            "install/source-bashrc",
            r"source.*\.bashrc",
            "sources .bashrc to reload configuration",
            "source",
            "Missing 'source ~/.bashrc' command",
        )),
        Box::new(RubyInstallRule),
        Box::new(PatternRule::new(
            "install/ruby-global",
            r"rbenv global [0-9]+\.[0-9]+\.[0-9]+",
            "sets global Ruby version",
            "global Ruby",
            "Missing 'rbenv global' command",
        )),
        Box::new(PatternRule::new(
            "install/bundler",
            r"gem install bundler",
            "installs bundler gem",
            "bundler",
            "Missing 'gem install bundler' command",
        )),
    ]
}

pub fn quality_rules() -> Vec<Box<dyn Check<ScriptInput>>> {
    let mut rules: Vec<Box<dyn Check<ScriptInput>>> = vec![
        Box::new(PatternRule::new(
            "install/non-interactive",
            r"sudo apt install.*-y",
            "uses -y flag for non-interactive install",
            "-y flag",
            "apt install should use -y for automation",
        )),
        Box::new(VersionConsistencyRule),
    ];
    for r in order_rules() {
        rules.push(Box::new(r));
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogcheck_core::Outcome;

    fn script(body: &str) -> ScriptInput {
        ScriptInput::from_content("install.sh", body)
    }

    #[test]
    fn shebang_requires_interpreter() {
        let rule = ShebangRule {
            interpreter: "bash".into(),
        };
        assert!(rule.eval(&script("#!/usr/bin/env bash\n")).passed());
        let r = rule.eval(&script("#!/bin/sh\n"));
        assert_eq!(r.outcome, Outcome::Fail);
        assert_eq!(r.detail.as_deref(), Some("Missing or invalid: '#!/bin/sh'"));
        assert!(!rule.eval(&script("echo bash\n")).passed());
    }

    #[test]
    fn syntax_spawn_failure_is_a_failed_check() {
        let rule = SyntaxRule {
            shell: "blogcheck-no-such-shell".into(),
            timeout_secs: 1,
        };
        let r = rule.eval(&script("#!/bin/bash\n"));
        assert_eq!(r.outcome, Outcome::Fail);
        assert_eq!(r.label, "install.sh syntax check");
        assert!(r
            .detail
            .as_deref()
            .is_some_and(|d| d.starts_with("spawn blogcheck-no-such-shell")));
    }

    #[test]
    fn non_executable_still_passes_with_note() {
        let mut s = script("#!/bin/bash\n");
        s.executable = false;
        let r = ExecutableRule.eval(&s);
        assert!(r.passed());
        assert_eq!(r.label, "install.sh executability check (not required)");
        assert!(r.note.unwrap().contains("chmod +x install.sh"));
    }

    #[test]
    fn crlf_fails_line_endings() {
        assert!(!LineEndingRule.eval(&script("#!/bin/bash\r\necho hi\r\n")).passed());
        assert!(LineEndingRule.eval(&script("#!/bin/bash\necho hi\n")).passed());
    }

    #[test]
    fn missing_packages_are_listed() {
        let rule = RequiredPackagesRule {
            packages: vec!["git".into(), "curl".into(), "zlib1g-dev".into()],
        };
        let r = rule.eval(&script("sudo apt install -y git\n"));
        assert_eq!(r.detail.as_deref(), Some("Missing packages: curl, zlib1g-dev"));
        let r = rule.eval(&script("apt-get install git\n"));
        assert_eq!(r.detail.as_deref(), Some("No 'apt install' command found"));
        assert!(rule
            .eval(&script("sudo apt install -y git curl zlib1g-dev\n"))
            .passed());
    }

    #[test]
    fn packages_only_count_on_the_first_install_line() {
        let rule = RequiredPackagesRule {
            packages: vec!["git".into(), "curl".into()],
        };
        let r = rule.eval(&script("sudo apt install -y git\nsudo apt install -y curl\n"));
        assert_eq!(r.detail.as_deref(), Some("Missing packages: curl"));
    }

    #[test]
    fn version_mismatch_cites_both_values() {
        let r = VersionConsistencyRule.eval(&script("rbenv install 3.2.0\nrbenv global 3.2.1\n"));
        assert_eq!(r.outcome, Outcome::Fail);
        assert_eq!(r.detail.as_deref(), Some("Install 3.2.0 != global 3.2.1"));
    }

    #[test]
    fn version_match_passes() {
        let r = VersionConsistencyRule.eval(&script("rbenv install 3.2.0\nrbenv global 3.2.0\n"));
        assert!(r.passed());
        assert_eq!(r.label, "install.sh: Ruby version consistent (3.2.0)");
    }

    #[test]
    fn version_missing_cannot_extract() {
        let r = VersionConsistencyRule.eval(&script("rbenv install 3.2.0\n"));
        assert_eq!(r.detail.as_deref(), Some("Could not extract versions"));
    }

    #[test]
    fn ruby_install_label_has_version() {
        let r = RubyInstallRule.eval(&script("rbenv install 3.3.5 --verbose\n"));
        assert_eq!(r.label, "install.sh installs Ruby version (3.3.5)");
    }

    #[test]
    fn order_uses_first_offsets() {
        let rules = order_rules();
        let rule = &rules[0];
        assert!(rule
            .eval(&script("sudo apt update\nsudo apt install -y git\n"))
            .passed());
        let r = rule.eval(&script("sudo apt install -y git\nsudo apt update\nsudo apt install -y curl\n"));
        assert!(!r.passed());
        assert_eq!(r.label, "install.sh: Command order");
        assert_eq!(r.detail.as_deref(), Some("apt update runs before apt install"));
    }

    #[test]
    fn order_absent_before_still_precedes() {
        let rules = order_rules();
        let rule = &rules[0];
        assert!(rule.eval(&script("sudo apt install -y git\n")).passed());
        // both absent: -1 < -1 is false
        assert!(!rule.eval(&script("echo\n")).passed());
    }

    #[test]
    fn non_interactive_flag() {
        let rules = quality_rules();
        let flag = &rules[0];
        assert!(!flag.eval(&script("sudo apt install git curl\n")).passed());
        assert!(flag.eval(&script("sudo apt install -y git curl\n")).passed());
    }

    #[test]
    fn pattern_rules_are_case_sensitive() {
        let rules = command_rules(&[]);
        let bundler = rules.iter().find(|r| r.id() == "install/bundler").unwrap();
        assert!(!bundler.eval(&script("GEM INSTALL BUNDLER\n")).passed());
        assert!(bundler.eval(&script("gem install bundler\n")).passed());
    }
}
