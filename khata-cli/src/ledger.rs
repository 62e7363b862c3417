//! Fingerprint-keyed JSONL transaction store
//!
//! Stand-in for the spreadsheet destination: one transaction per line,
//! appends skip fingerprints already present, so re-importing the same
//! statement is a no-op.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use khata_core::Transaction;

pub fn read_ledger(path: &Path) -> Result<Vec<Transaction>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    raw.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).with_context(|| format!("bad ledger line: {l}")))
        .collect()
}

/// Append only transactions whose fingerprint is new. Returns
/// (added, skipped).
pub fn append_new(path: &Path, transactions: &[Transaction]) -> Result<(usize, usize)> {
    let existing: HashSet<String> = read_ledger(path)?
        .into_iter()
        .map(|t| t.fingerprint)
        .collect();

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;

    let mut added = 0;
    let mut skipped = 0;
    for tx in transactions {
        if existing.contains(&tx.fingerprint) {
            skipped += 1;
            continue;
        }
        writeln!(file, "{}", serde_json::to_string(tx)?)?;
        added += 1;
    }

    Ok((added, skipped))
}

/// Dump the whole ledger as CSV for spreadsheet import.
pub fn export_csv(ledger: &Path, out: &Path) -> Result<usize> {
    let transactions = read_ledger(ledger)?;
    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("create {}", out.display()))?;
    for tx in &transactions {
        writer.serialize(tx)?;
    }
    writer.flush()?;
    Ok(transactions.len())
}
