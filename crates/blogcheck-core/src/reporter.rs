use std::fmt;
use std::io::{self, Write};

use crate::types::{CheckResult, Outcome, Tally};

const RULE_WIDTH: usize = 50;

#[derive(Clone, Copy, Debug)]
enum Tone {
    Green,
    Red,
    Yellow,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Self::Green => "\u{1b}[0;32m",
            Self::Red => "\u{1b}[0;31m",
            Self::Yellow => "\u{1b}[1;33m",
        }
    }
}

const RESET: &str = "\u{1b}[0m";

/// Accumulates pass/fail counts and prints one line per check.
///
/// Write errors on the sink are ignored; reporting never aborts a run.
pub struct Reporter<W: Write> {
    out: W,
    color_enabled: bool,
    tally: Tally,
}

impl Reporter<io::Stdout> {
    pub fn stdout(color_enabled: bool) -> Self {
        Self::new(io::stdout(), color_enabled)
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color_enabled: bool) -> Self {
        Self {
            out,
            color_enabled,
            tally: Tally::default(),
        }
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn record_pass(&mut self, message: &str) {
        self.tally.run += 1;
        self.tally.passed += 1;
        let mark = self.paint(Tone::Green, "✓");
        self.line(format_args!("{mark} {message}"));
    }

    pub fn record_fail(&mut self, message: &str, error: &str) {
        self.tally.run += 1;
        self.tally.failed += 1;
        let mark = self.paint(Tone::Red, "✗");
        let detail = self.paint(Tone::Yellow, &format!("Error: {error}"));
        self.line(format_args!("{mark} {message}"));
        self.line(format_args!("  {detail}"));
    }

    pub fn record(&mut self, result: &CheckResult) {
        if let Some(note) = &result.note {
            self.warn_mark(note);
        }
        match result.outcome {
            Outcome::Pass => self.record_pass(&result.label),
            Outcome::Fail => {
                let detail = result.detail.as_deref().unwrap_or("");
                self.record_fail(&result.label, detail)
            }
        }
    }

    pub fn record_all<'a>(&mut self, results: impl IntoIterator<Item = &'a CheckResult>) {
        for r in results {
            self.record(r);
        }
    }

    pub fn title(&mut self, title: &str) {
        self.line(format_args!("{title}"));
        self.line(format_args!("{}", "=".repeat(RULE_WIDTH)));
    }

    pub fn section(&mut self, title: &str) {
        self.line(format_args!(""));
        self.title(title);
    }

    /// Uncounted yellow warning line.
    pub fn warn(&mut self, message: &str) {
        let text = self.paint(Tone::Yellow, &format!("Warning: {message}"));
        self.line(format_args!("{text}"));
    }

    fn warn_mark(&mut self, message: &str) {
        let mark = self.paint(Tone::Yellow, "⚠");
        self.line(format_args!("{mark} {message}"));
    }

    /// Prints the totals and returns the process exit status.
    pub fn summarize(&mut self) -> i32 {
        let t = self.tally;
        self.line(format_args!(""));
        self.line(format_args!("{}", "=".repeat(RULE_WIDTH)));
        self.title("Test Summary");
        self.line(format_args!("Tests run: {}", t.run));
        let passed = self.paint(Tone::Green, &t.passed.to_string());
        self.line(format_args!("Tests passed: {passed}"));
        if t.failed > 0 {
            let failed = self.paint(Tone::Red, &t.failed.to_string());
            self.line(format_args!("Tests failed: {failed}\n"));
        } else {
            let failed = self.paint(Tone::Green, "0");
            self.line(format_args!("Tests failed: {failed}\n"));
            let done = self.paint(Tone::Green, "All tests passed!");
            self.line(format_args!("{done}"));
        }
        let _ = self.out.flush();
        t.exit_code()
    }

    fn paint(&self, tone: Tone, text: &str) -> String {
        if self.color_enabled {
            format!("{}{text}{RESET}", tone.code())
        } else {
            text.to_string()
        }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{args}");
    }
}
