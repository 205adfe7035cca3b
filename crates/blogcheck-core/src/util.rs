use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::{CheckError, CheckResultT};

#[derive(Clone, Debug)]
pub struct CmdOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

/// Runs `program args...` to completion, killing it after `secs`.
///
/// Uses a current-thread runtime; nothing else runs while waiting.
pub fn run_with_timeout(program: &str, args: &[&str], secs: u64) -> CheckResultT<CmdOutput> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| CheckError::Spawn {
            program: program.to_string(),
            source,
        })?;
    rt.block_on(run_async(program, args, secs))
}

async fn run_async(program: &str, args: &[&str], secs: u64) -> CheckResultT<CmdOutput> {
    let mut proc = tokio::process::Command::new(program);
    proc.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!(program, ?args, secs, "spawning");
    let child = proc.spawn().map_err(|source| CheckError::Spawn {
        program: program.to_string(),
        source,
    })?;

    match timeout(Duration::from_secs(secs), child.wait_with_output()).await {
        Ok(Ok(out)) => {
            tracing::debug!(program, code = ?out.status.code(), "exited");
            Ok(CmdOutput {
                success: out.status.success(),
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).to_string(),
            })
        }
        Ok(Err(source)) => Err(CheckError::Spawn {
            program: program.to_string(),
            source,
        }),
        // kill_on_drop reaps the child once the future is dropped
        Err(_) => Err(CheckError::Timeout {
            program: program.to_string(),
            secs,
        }),
    }
}

/// Parse-only syntax check: `<shell> -n <script>`.
pub fn shell_syntax_check(shell: &str, script: &Path, secs: u64) -> CheckResultT<CmdOutput> {
    let script = script.to_string_lossy();
    run_with_timeout(shell, &["-n", script.as_ref()], secs)
}

pub fn program_on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run_with_timeout("blogcheck-definitely-not-a-program", &[], 1).unwrap_err();
        assert!(matches!(err, CheckError::Spawn { .. }));
    }

    #[test]
    fn slow_program_times_out() {
        if !program_on_path("sleep") {
            return;
        }
        let err = run_with_timeout("sleep", &["5"], 1).unwrap_err();
        assert!(matches!(err, CheckError::Timeout { secs: 1, .. }));
        assert_eq!(err.to_string(), "sleep timed out after 1s");
    }

    #[test]
    fn exit_status_is_reported() {
        if !program_on_path("sh") {
            return;
        }
        let ok = run_with_timeout("sh", &["-c", "exit 0"], 5).unwrap();
        assert!(ok.success);
        let bad = run_with_timeout("sh", &["-c", "echo oops >&2; exit 3"], 5).unwrap();
        assert!(!bad.success);
        assert_eq!(bad.code, Some(3));
        assert_eq!(bad.stderr.trim(), "oops");
    }
}
