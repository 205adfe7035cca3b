use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    pub check_id: String,
    pub label: String,
    pub outcome: Outcome,
    /// Failure detail; `None` on pass.
    pub detail: Option<String>,
    /// Advisory warning printed ahead of the result line.
    pub note: Option<String>,
}

impl CheckResult {
    pub fn pass(check_id: &str, label: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            label: label.into(),
            outcome: Outcome::Pass,
            detail: None,
            note: None,
        }
    }

    pub fn fail(check_id: &str, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            check_id: check_id.to_string(),
            label: label.into(),
            outcome: Outcome::Fail,
            detail: Some(detail.into()),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tally {
    pub run: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            0
        } else {
            1
        }
    }
}
