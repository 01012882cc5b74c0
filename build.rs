use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    // askama reads templates at compile time
    println!("cargo:rerun-if-changed=templates");

    println!("cargo:rustc-env=GIT_VERSION={}", build_version());
}

/// Version reported by `/health` and the startup log: `GIT_VERSION` from the
/// build environment, then `git describe`, then "dev".
fn build_version() -> String {
    let from_env = std::env::var("GIT_VERSION")
        .ok()
        .filter(|v| !v.is_empty() && v != "dev");
    if let Some(version) = from_env {
        return version;
    }

    Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "dev".to_string())
}
