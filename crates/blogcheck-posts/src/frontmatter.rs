//! Frontmatter block extraction.
//!
//! A post opens with a `---` line, followed by `key: value` lines, closed by the
//! next `---` line. The pattern checks work on raw text; only the strict YAML
//! check parses the block.

use serde_yaml::{Mapping, Value};

/// Text between the opening and closing `---` lines, if both are present.
pub fn extract(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---\n")?;
    if rest.starts_with("---\n") {
        return Some("");
    }
    let end = rest
        .find("\n---\n")
        .or_else(|| rest.strip_suffix("\n---").map(str::len))?;
    Some(&rest[..end])
}

/// Number of delimiter lines, counted the way the delimiter check expects:
/// every `\n---\n` in the file plus any `---\n` in the first ten characters.
pub fn delimiter_count(content: &str, head: &str) -> usize {
    content.matches("\n---\n").count() + head.matches("---\n").count()
}

pub fn parse(block: &str) -> Result<Mapping, serde_yaml::Error> {
    if block.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(block)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        other => Err(serde::de::Error::custom(format!(
            "frontmatter is not a mapping (found {})",
            kind(&other)
        ))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
