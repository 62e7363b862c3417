//! khata-extract: PDF text extraction with content-addressed caching
//!
//! Extraction is deterministic for identical bytes, so the extracted
//! text is cached under the SHA-256 of the document. Re-processing the
//! same statement never touches the PDF machinery twice.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};

/// Where a cache entry for these document bytes would live.
fn cache_path(cache_dir: &Path, bytes: &[u8]) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    cache_dir.join(format!("{}.txt", hex::encode(hasher.finalize())))
}

/// Extract plain text from a statement PDF, going through the cache.
///
/// Password-protected documents are handed to a `pdftotext -upw`
/// subprocess; everything else goes through pdf-extract in-process.
/// An encrypted document with a wrong or missing password is an error
/// here; callers treat unusable text as "no profile match" downstream.
pub fn extract_text(
    pdf_path: impl AsRef<Path>,
    password: Option<&str>,
    cache_dir: impl AsRef<Path>,
) -> Result<String> {
    let pdf_path = pdf_path.as_ref();
    let cache_dir = cache_dir.as_ref();

    let bytes = fs::read(pdf_path).with_context(|| format!("read {}", pdf_path.display()))?;

    fs::create_dir_all(cache_dir).with_context(|| format!("create {}", cache_dir.display()))?;
    let cached = cache_path(cache_dir, &bytes);
    if cached.exists() {
        tracing::info!(path = %pdf_path.display(), "using cached statement text");
        return fs::read_to_string(&cached).with_context(|| format!("read {}", cached.display()));
    }

    tracing::info!(path = %pdf_path.display(), "extracting statement text");
    let text = match password {
        Some(pw) => extract_with_pdftotext(pdf_path, pw)?,
        None => pdf_extract::extract_text(pdf_path)
            .with_context(|| format!("extract text from {}", pdf_path.display()))?,
    };

    fs::write(&cached, &text).with_context(|| format!("write {}", cached.display()))?;
    Ok(text)
}

fn extract_with_pdftotext(pdf_path: &Path, password: &str) -> Result<String> {
    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg("-upw")
        .arg(password)
        .arg(pdf_path)
        .arg("-")
        .output()
        .context("running pdftotext (is poppler installed?)")?;

    if !output.status.success() {
        bail!(
            "pdftotext failed for {} (wrong password?): {}",
            pdf_path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
