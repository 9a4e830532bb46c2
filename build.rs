use std::path::Path;
use std::process::Command;

fn main() {
    let revision = git_revision().unwrap_or_else(|| "unknown".into());
    println!("cargo:rustc-env=SCREEN_ANNOTATE_GIT_HASH={revision}");

    // Embedded via include_str!
    println!("cargo:rerun-if-changed=config.example.toml");

    for path in [".git/HEAD", ".git/refs", ".git/packed-refs"] {
        if Path::new(path).exists() {
            println!("cargo:rerun-if-changed={path}");
        }
    }
}

fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let revision = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!revision.is_empty()).then_some(revision)
}
