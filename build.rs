use std::env;
use std::process::Command;

/// Version string baked into `taskboard --version`: `TASKBOARD_VERSION` if
/// set, else `git describe`, else the crate version.
fn describe() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let s = String::from_utf8_lossy(&out.stdout).trim().to_string();
    Some(s.strip_prefix('v').map(str::to_string).unwrap_or(s))
}

fn main() {
    println!("cargo:rerun-if-env-changed=TASKBOARD_VERSION");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let version = env::var("TASKBOARD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(describe)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").into());

    println!("cargo:rustc-env=GIT_VERSION={version}");
}
