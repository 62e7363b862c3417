//! Learned keyword-to-category dictionary with an explicit on-disk
//! lifecycle: loaded once at start, persisted only when it changes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Seed mappings for a fresh dictionary
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("milk", "grocery"),
    ("subji", "grocery"),
    ("dahi", "grocery"),
    ("breakfast", "grocery"),
    ("chai", "eating out"),
    ("gas", "gas bill"),
    ("flight", "transport"),
    ("train", "transport"),
    ("uber", "transport"),
    ("ola", "transport"),
    ("zomato", "eating out"),
    ("swiggy", "eating out"),
    ("amazon", "shopping"),
    ("flipkart", "shopping"),
    ("myntra", "shopping"),
    ("pharmacy", "medicines"),
    ("medical", "medicines"),
    ("hospital", "medicines"),
];

/// Keyword -> category-label dictionary backing the classifier prompt
#[derive(Debug)]
pub struct CategoryContext {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl CategoryContext {
    /// Load the dictionary, creating it with the default seed when the
    /// file does not exist yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            let ctx = Self {
                path,
                entries: DEFAULT_ENTRIES
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            };
            ctx.save()?;
            return Ok(ctx);
        }

        let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let entries = serde_json::from_str(&raw)
            .with_context(|| format!("parse {}", path.display()))?;
        Ok(Self { path, entries })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    pub fn entries(&self) -> &HashMap<String, String> {
        &self.entries
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.entries.contains_key(keyword)
    }

    /// Record a newly learned mapping. Returns false if the keyword was
    /// already known (existing knowledge is never overwritten).
    pub fn learn(&mut self, keyword: &str, label: &str) -> bool {
        if self.entries.contains_key(keyword) {
            return false;
        }
        self.entries.insert(keyword.to_string(), label.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_dictionary_gets_seeded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("categories-context.json");
        let ctx = CategoryContext::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(ctx.entries().get("swiggy").map(String::as_str), Some("eating out"));
        assert_eq!(ctx.entries().len(), DEFAULT_ENTRIES.len());
    }

    #[test]
    fn test_learned_entries_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("categories-context.json");

        let mut ctx = CategoryContext::load(&path).unwrap();
        assert!(ctx.learn("blinkit", "grocery"));
        assert!(!ctx.learn("blinkit", "shopping"), "must not overwrite");
        ctx.save().unwrap();

        let reloaded = CategoryContext::load(&path).unwrap();
        assert_eq!(reloaded.entries().get("blinkit").map(String::as_str), Some("grocery"));
    }
}
