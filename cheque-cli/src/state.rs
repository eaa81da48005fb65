use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CHEQUEMATE_HOME`, or `~/.chequemate`.
pub fn chequemate_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("CHEQUEMATE_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".chequemate"))
}

pub fn ensure_chequemate_home() -> Result<PathBuf> {
    let dir = chequemate_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_database_path() -> Result<PathBuf> {
    Ok(chequemate_home()?.join("cheque_processing.db"))
}
