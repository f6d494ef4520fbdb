use std::process::Command;

/// Short hash of the checked-out commit, when built from a git tree.
fn git_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?.trim().to_string();
    (!hash.is_empty()).then_some(hash)
}

fn main() {
    println!("cargo::rerun-if-changed=../../.git/HEAD");
    println!("cargo::rerun-if-env-changed=CATALOG_BUILD_COMMIT");

    // packagers building from a tarball pass the commit in explicitly
    let commit = std::env::var("CATALOG_BUILD_COMMIT")
        .ok()
        .filter(|hash| !hash.trim().is_empty())
        .or_else(git_commit)
        .unwrap_or_else(|| "dev".to_string());

    println!("cargo::rustc-env=CATALOG_BUILD_COMMIT={}", commit);
}
