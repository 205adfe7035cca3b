use std::path::{Path, PathBuf};

use blogcheck_core::{program_on_path, InstallConfig, Reporter, Tally};
use blogcheck_install::InstallChecker;
use tempfile::tempdir;

const GOOD_SCRIPT: &str = r#"#!/bin/bash
set -e

sudo apt update
sudo apt install -y git curl build-essential libssl-dev libreadline-dev zlib1g-dev

git clone https://github.com/rbenv/rbenv.git ~/.rbenv
git clone https://github.com/rbenv/ruby-build.git ~/.rbenv/plugins/ruby-build

echo 'export PATH="$HOME/.rbenv/bin:$PATH"' >> ~/.bashrc
echo 'eval "$(rbenv init -)"' >> ~/.bashrc
source ~/.bashrc

rbenv install 3.2.0
rbenv global 3.2.0
gem install bundler
"#;

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let p = dir.join("install.sh");
    std::fs::write(&p, body).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&p, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    p
}

fn run(path: &Path) -> (Tally, String) {
    let checker = InstallChecker::new(InstallConfig::default());
    let mut r = Reporter::new(Vec::new(), false);
    checker.run(path, &mut r);
    let t = r.tally();
    (t, String::from_utf8(r.into_inner()).unwrap())
}

#[test]
fn good_script_passes_everything() {
    if !program_on_path("bash") {
        return;
    }
    let dir = tempdir().unwrap();
    let p = write_script(dir.path(), GOOD_SCRIPT);
    let (t, out) = run(&p);
    assert_eq!(t.failed, 0, "{out}");
    // existence gate + 20 checks
    assert_eq!(t.run, 21);
    assert!(out.contains("✓ install.sh has no syntax errors"));
    assert!(out.contains("✓ install.sh installs Ruby version (3.2.0)"));
    assert!(out.contains("✓ install.sh: .bashrc sourced before rbenv install"));
}

#[test]
fn missing_yes_flag_fails_only_that_check() {
    if !program_on_path("bash") {
        return;
    }
    let dir = tempdir().unwrap();
    let body = GOOD_SCRIPT.replace("sudo apt install -y ", "sudo apt install ");
    let p = write_script(dir.path(), &body);
    let (t, out) = run(&p);
    assert_eq!(t.run, 21);
    assert_eq!(t.failed, 1, "{out}");
    assert!(out.contains("✗ install.sh -y flag\n  Error: apt install should use -y for automation"));
}

#[test]
fn version_mismatch_is_reported() {
    if !program_on_path("bash") {
        return;
    }
    let dir = tempdir().unwrap();
    let body = GOOD_SCRIPT.replace("rbenv global 3.2.0", "rbenv global 3.2.1");
    let p = write_script(dir.path(), &body);
    let (t, out) = run(&p);
    assert_eq!(t.failed, 1, "{out}");
    assert!(out.contains("Install 3.2.0 != global 3.2.1"));
}

#[test]
fn syntax_error_is_reported() {
    if !program_on_path("bash") {
        return;
    }
    let dir = tempdir().unwrap();
    let body = format!("{GOOD_SCRIPT}if true; then\n");
    let p = write_script(dir.path(), &body);
    let (_, out) = run(&p);
    assert!(out.contains("✗ install.sh syntax check\n  Error: Syntax errors:"));
}

#[test]
fn reordered_commands_fail_order_checks() {
    let dir = tempdir().unwrap();
    let body = GOOD_SCRIPT.replace(
        "source ~/.bashrc\n\nrbenv install 3.2.0\n",
        "rbenv install 3.2.0\nsource ~/.bashrc\n",
    );
    let p = write_script(dir.path(), &body);
    let (_, out) = run(&p);
    assert!(out.contains("✗ install.sh: Command order\n  Error: .bashrc sourced before rbenv install"));
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempdir().unwrap();
    let p = write_script(dir.path(), "#!/bin/sh\r\necho hi\r\n");
    let (a, _) = run(&p);
    let (b, _) = run(&p);
    assert_eq!(a, b);
    assert!(a.failed > 0);
}

#[test]
fn missing_script_stops_after_gate() {
    let dir = tempdir().unwrap();
    let (t, out) = run(&dir.path().join("install.sh"));
    assert_eq!(t, Tally { run: 1, passed: 0, failed: 1 });
    assert!(!out.contains("Command Validation Tests"));
}

#[test]
fn unreadable_script_stops_after_gate() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("install.sh");
    std::fs::write(&p, b"#!/bin/bash\necho \xff\xfe\n").unwrap();
    let (t, out) = run(&p);
    assert_eq!(t, Tally { run: 1, passed: 0, failed: 1 });
    assert!(out.contains("✗ install.sh exists and is readable\n  Error: read "));
    assert!(!out.contains("Command Validation Tests"));
}

#[cfg(unix)]
#[test]
fn non_executable_script_warns_but_passes() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempdir().unwrap();
    let p = write_script(dir.path(), GOOD_SCRIPT);
    std::fs::set_permissions(&p, std::fs::Permissions::from_mode(0o644)).unwrap();
    let (_, out) = run(&p);
    assert!(out.contains("⚠ install.sh is not executable (consider: chmod +x install.sh)"));
    assert!(out.contains("✓ install.sh executability check (not required)"));
}
