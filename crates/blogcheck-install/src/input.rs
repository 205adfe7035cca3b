use std::path::{Path, PathBuf};

use blogcheck_core::{CheckError, CheckResultT};

/// An install script loaded once and shared by every check.
#[derive(Clone, Debug)]
pub struct ScriptInput {
    pub path: PathBuf,
    /// File name used as the prefix of every label.
    pub name: String,
    pub content: String,
    pub executable: bool,
}

impl ScriptInput {
    pub fn load(path: &Path) -> CheckResultT<Self> {
        if !path.exists() {
            return Err(CheckError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            name: display_name(path),
            content,
            executable: is_executable(path),
        })
    }

    /// In-memory input; used by tests that never touch the disk.
    pub fn from_content(name: &str, content: &str) -> Self {
        Self {
            path: PathBuf::from(name),
            name: name.to_string(),
            content: content.to_string(),
            executable: true,
        }
    }

    pub fn first_line(&self) -> &str {
        self.content.split('\n').next().unwrap_or("")
    }

    /// Byte offset of the first occurrence of `needle`, or -1.
    pub fn offset_of(&self, needle: &str) -> i64 {
        self.content.find(needle).map(|i| i as i64).unwrap_or(-1)
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_first_match_or_minus_one() {
        let s = ScriptInput::from_content("install.sh", "a\nsudo apt update\nsudo apt update\n");
        assert_eq!(s.offset_of("sudo apt update"), 2);
        assert_eq!(s.offset_of("rbenv install"), -1);
    }

    #[test]
    fn first_line_keeps_carriage_return() {
        let s = ScriptInput::from_content("install.sh", "#!/bin/bash\r\necho\r\n");
        assert_eq!(s.first_line(), "#!/bin/bash\r");
        let empty = ScriptInput::from_content("install.sh", "");
        assert_eq!(empty.first_line(), "");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = ScriptInput::load(Path::new("/definitely/not/here/install.sh")).unwrap_err();
        assert!(matches!(err, CheckError::NotFound(_)));
    }
}
