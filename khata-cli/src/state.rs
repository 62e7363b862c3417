use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub fn khata_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".khata"))
}

pub fn ensure_khata_home() -> Result<PathBuf> {
    let dir = khata_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn cache_dir() -> Result<PathBuf> {
    Ok(ensure_khata_home()?.join("cache"))
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(ensure_khata_home()?.join("ledger.jsonl"))
}

pub fn context_path() -> Result<PathBuf> {
    Ok(ensure_khata_home()?.join("categories-context.json"))
}
