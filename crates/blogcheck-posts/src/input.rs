use std::path::{Path, PathBuf};

use blogcheck_core::{CheckError, CheckResultT};

#[derive(Clone, Debug)]
pub struct PostInput {
    pub path: PathBuf,
    pub filename: String,
    pub content: String,
}

impl PostInput {
    pub fn load(path: &Path) -> CheckResultT<Self> {
        if !path.exists() {
            return Err(CheckError::NotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            filename: filename_of(path),
            content: normalize_newlines(&raw),
        })
    }

    pub fn from_content(filename: &str, content: &str) -> Self {
        Self {
            path: PathBuf::from(filename),
            filename: filename.to_string(),
            content: content.to_string(),
        }
    }

    /// The first `n` characters of the post.
    pub fn head(&self, n: usize) -> &str {
        match self.content.char_indices().nth(n) {
            Some((i, _)) => &self.content[..i],
            None => &self.content,
        }
    }
}

/// Folds `\r\n` and lone `\r` into `\n`, as a text-mode read would.
pub fn normalize_newlines(raw: &str) -> String {
    if raw.contains('\r') {
        raw.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        raw.to_string()
    }
}

pub fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
