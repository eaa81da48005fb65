//! Stamps `chequemate --version` with the commit it was built from.
//!
//! Emits `CHEQUEMATE_BUILD_SHA` as `<short-sha>`, `<short-sha>-dirty` when the
//! tree has uncommitted changes, or `unknown` outside a git checkout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn git(repo_root: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(repo_root).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}

/// Re-run when HEAD moves, whether by checkout or by a commit on the branch.
fn watch_head(repo_root: &Path) {
    let head = repo_root.join(".git").join("HEAD");
    if !head.exists() {
        return;
    }
    println!("cargo:rerun-if-changed={}", head.display());

    if let Some(branch_ref) = fs::read_to_string(&head)
        .ok()
        .and_then(|s| s.trim().strip_prefix("ref: ").map(str::to_string))
    {
        let ref_file = repo_root.join(".git").join(branch_ref);
        if ref_file.exists() {
            println!("cargo:rerun-if-changed={}", ref_file.display());
        }
    }
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = PathBuf::from(manifest_dir).join("..");

    println!("cargo:rerun-if-changed=build.rs");
    watch_head(&repo_root);

    let stamp = match git(&repo_root, &["rev-parse", "--short", "HEAD"]).filter(|s| !s.is_empty()) {
        Some(sha) => {
            let dirty = git(&repo_root, &["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|s| !s.is_empty());
            if dirty { format!("{sha}-dirty") } else { sha }
        }
        None => "unknown".to_string(),
    };

    println!("cargo:rustc-env=CHEQUEMATE_BUILD_SHA={stamp}");
}
