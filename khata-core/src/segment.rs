//! Line regrouping for statements whose narrations wrap across lines
//!
//! Savings statements break long UPI narrations over several physical
//! lines. Before field extraction can run, those lines have to be folded
//! back into one chunk per transaction.

use std::sync::OnceLock;

use regex::Regex;

fn pagination_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Page No \.:[\s\S]*?-- \d+ of \d+ --").expect("pagination regex")
    })
}

fn block_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}/\d{2}\s").expect("block start regex"))
}

/// Marker opening the trailing summary section; nothing after it is
/// transaction data.
const SUMMARY_MARKER: &str = "STATEMENT SUMMARY";

/// Fold raw statement text into one chunk per candidate transaction.
///
/// Pagination artifacts are stripped and the trailing summary section is
/// cut off first. A line opening with a short date token starts a new
/// block; every following line is space-joined onto it until the next
/// date line. Output preserves document order, which the balance
/// reconciler depends on.
pub fn segment_blocks(text: &str) -> Vec<String> {
    let cleaned = pagination_re().replace_all(text, "");
    let body = cleaned.split(SUMMARY_MARKER).next().unwrap_or("");

    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if block_start_re().is_match(line) {
            if !current.is_empty() {
                blocks.push(current);
            }
            current = line.to_string();
        } else if !current.is_empty() {
            current.push(' ');
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
