use std::sync::LazyLock;

use blogcheck_core::{Check, CheckResult};
use regex::Regex;

use crate::frontmatter;
use crate::input::PostInput;

static RE_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}-.*\.md$").unwrap());

static RE_DATE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^date:\s*(.+)$").unwrap());

static RE_DATE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}\s+[+-]\d{4}$").unwrap()
});

static RE_TITLE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^title:\s*(.+)$").unwrap());

static RE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^```").unwrap());

static RE_BAD_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}[^# \n]").unwrap());

/// Characters searched for required frontmatter keys.
pub const FIELD_WINDOW: usize = 500;

/// Characters searched for a leading `---` delimiter.
const DELIMITER_WINDOW: usize = 10;

pub struct FilenameRule;

impl Check<PostInput> for FilenameRule {
    fn id(&self) -> &str {
        "post/filename"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        if RE_FILENAME.is_match(f) {
            CheckResult::pass(self.id(), format!("{f}: Filename format is valid"))
        } else {
            CheckResult::fail(
                self.id(),
                format!("{f}: Filename format"),
                "Should follow pattern: YYYY-MM-DD-title.md",
            )
        }
    }
}

pub struct FrontmatterRule;

impl Check<PostInput> for FrontmatterRule {
    fn id(&self) -> &str {
        "post/frontmatter"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let count = frontmatter::delimiter_count(&input.content, input.head(DELIMITER_WINDOW));
        if count >= 2 {
            CheckResult::pass(self.id(), format!("{f}: Frontmatter exists"))
        } else {
            CheckResult::fail(
                self.id(),
                format!("{f}: Frontmatter exists"),
                format!("Missing or incomplete YAML frontmatter (found {count} delimiters)"),
            )
        }
    }
}

pub struct RequiredFieldsRule {
    pub fields: Vec<String>,
}

impl Check<PostInput> for RequiredFieldsRule {
    fn id(&self) -> &str {
        "post/required-fields"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let head = input.head(FIELD_WINDOW);
        let missing: Vec<&str> = self
            .fields
            .iter()
            .map(|s| s.as_str())
            .filter(|field| !head.contains(*field))
            .collect();
        if missing.is_empty() {
            CheckResult::pass(self.id(), format!("{f}: All required fields present"))
        } else {
            CheckResult::fail(
                self.id(),
                format!("{f}: Required fields"),
                format!("Missing: {}", missing.join(", ")),
            )
        }
    }
}

pub struct DateRule;

impl Check<PostInput> for DateRule {
    fn id(&self) -> &str {
        "post/date"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let label = format!("{f}: Date format");
        let Some(raw) = first_field(&RE_DATE_FIELD, &input.content) else {
            return CheckResult::fail(self.id(), label, "No date field found");
        };
        let value = raw.trim();
        if RE_DATE_VALUE.is_match(value) {
            CheckResult::pass(self.id(), format!("{f}: Date format is valid"))
        } else {
            CheckResult::fail(
                self.id(),
                label,
                format!("Invalid format: '{value}' (expected: YYYY-MM-DD HH:MM:SS +ZZZZ)"),
            )
        }
    }
}

pub struct TitleRule;

impl Check<PostInput> for TitleRule {
    fn id(&self) -> &str {
        "post/title"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let title = first_field(&RE_TITLE_FIELD, &input.content)
            .map(|t| t.trim().trim_matches(&['"', '\''][..]))
            .unwrap_or("");
        if title.is_empty() {
            CheckResult::fail(self.id(), format!("{f}: Title"), "Title is empty or missing")
        } else {
            CheckResult::pass(self.id(), format!("{f}: Title is not empty"))
        }
    }
}

pub struct ContentRule {
    pub min_lines: usize,
}

impl Check<PostInput> for ContentRule {
    fn id(&self) -> &str {
        "post/content"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let lines = input.content.split('\n').count();
        if lines > self.min_lines {
            CheckResult::pass(self.id(), format!("{f}: Post content exists"))
        } else {
            CheckResult::fail(
                self.id(),
                format!("{f}: Post content"),
                format!("File too short ({lines} lines)"),
            )
        }
    }
}

pub struct CodeFenceRule;

impl Check<PostInput> for CodeFenceRule {
    fn id(&self) -> &str {
        "post/code-blocks-balanced"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let fences = RE_FENCE.find_iter(&input.content).count();
        if fences % 2 == 0 {
            CheckResult::pass(self.id(), format!("{f}: Code blocks are balanced"))
        } else {
            CheckResult::fail(
                self.id(),
                format!("{f}: Code blocks"),
                format!("Unmatched code fence markers (found {fences})"),
            )
        }
    }
}

pub struct HeaderSpacingRule;

impl Check<PostInput> for HeaderSpacingRule {
    fn id(&self) -> &str {
        "post/headers"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let bad = RE_BAD_HEADER.find_iter(&input.content).count();
        if bad == 0 {
            CheckResult::pass(self.id(), format!("{f}: Headers formatted correctly"))
        } else {
            CheckResult::fail(
                self.id(),
                format!("{f}: Headers"),
                format!("Found {bad} headers without space after #"),
            )
        }
    }
}

/// Opt-in: the frontmatter block must parse as a YAML mapping.
pub struct YamlRule;

impl Check<PostInput> for YamlRule {
    fn id(&self) -> &str {
        "post/yaml"
    }

    fn eval(&self, input: &PostInput) -> CheckResult {
        let f = &input.filename;
        let label = format!("{f}: Frontmatter YAML");
        let Some(block) = frontmatter::extract(&input.content) else {
            return CheckResult::fail(self.id(), label, "No closed frontmatter block");
        };
        match frontmatter::parse(block) {
            Ok(_) => CheckResult::pass(self.id(), format!("{f}: Frontmatter is valid YAML")),
            Err(e) => CheckResult::fail(self.id(), label, e.to_string()),
        }
    }
}

fn first_field<'a>(re: &Regex, content: &'a str) -> Option<&'a str> {
    re.captures(content).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn post_rules(
    fields: &[String],
    min_lines: usize,
    strict_yaml: bool,
) -> Vec<Box<dyn Check<PostInput>>> {
    let mut rules: Vec<Box<dyn Check<PostInput>>> = vec![
        Box::new(FilenameRule),
        Box::new(FrontmatterRule),
        Box::new(RequiredFieldsRule {
            fields: fields.to_vec(),
        }),
        Box::new(DateRule),
        Box::new(TitleRule),
        Box::new(ContentRule { min_lines }),
        Box::new(CodeFenceRule),
        Box::new(HeaderSpacingRule),
    ];
    if strict_yaml {
        rules.push(Box::new(YamlRule));
    }
    rules
}
