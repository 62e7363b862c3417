//! Content-hash idempotency keys for parsed transactions

use sha2::{Digest, Sha256};

/// Hash the pipe-joined identity fields of a transaction.
///
/// Always 64 lowercase hex chars. Byte-identical fields reproduce the
/// same hash, which is the whole idempotency story: downstream stores
/// key on this and skip-on-exists.
pub fn fingerprint(fields: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(fields.join("|").as_bytes());
    hex::encode(hasher.finalize())
}

/// Render an amount for hashing with exactly two fractional digits, so
/// the fingerprint never depends on float display quirks.
pub fn amount_key(amount: f64) -> String {
    format!("{amount:.2}")
}
