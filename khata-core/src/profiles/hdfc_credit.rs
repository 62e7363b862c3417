//! HDFC credit-card statement profile
//!
//! Transaction rows are single-line, self-contained, and carry an
//! explicit direction tag, so extraction is a repeated scan of the raw
//! text with no segmentation pass:
//!   20/12/2023 AMAZON SELLER SERVICES 2,500.00 Dr

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::error::ParseWarning;
use crate::fingerprint::{amount_key, fingerprint};
use crate::profile::Profile;
use crate::types::{normalize_whitespace, parse_amount, Direction, SourceType, Transaction};

const PROFILE_NAME: &str = "HDFC Credit Card";

fn identity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)HDFC BANK.*CREDIT CARD").expect("identity regex"))
}

fn txn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?P<date>\d{2}/\d{2}/\d{4})\s+",
            r"(?P<narration>.+?)\s+",
            r"(?P<amount>[\d,]+\.\d{2})\s+",
            r"(?P<tag>Cr|Dr)"
        ))
        .expect("transaction regex")
    })
}

pub struct HdfcCreditProfile;

impl Profile for HdfcCreditProfile {
    fn name(&self) -> &'static str {
        PROFILE_NAME
    }

    fn source_type(&self) -> SourceType {
        SourceType::CreditCard
    }

    fn identify(&self, text: &str) -> bool {
        identity_re().is_match(text)
    }

    fn parse(&self, text: &str, warnings: &mut Vec<ParseWarning>) -> Vec<Transaction> {
        let imported_at = Utc::now().to_rfc3339();
        let mut out = Vec::new();

        for caps in txn_re().captures_iter(text) {
            let date = caps["date"].to_string();
            let narration = normalize_whitespace(&caps["narration"]);

            let Some(amount) = parse_amount(&caps["amount"]) else {
                let warning = ParseWarning::MalformedCandidate {
                    profile: PROFILE_NAME,
                    snippet: caps[0].to_string(),
                };
                tracing::warn!(%warning, "dropping candidate");
                warnings.push(warning);
                continue;
            };

            let direction = if &caps["tag"] == "Dr" {
                Direction::Debit
            } else {
                Direction::Credit
            };

            let fingerprint = fingerprint(&[
                &date,
                &narration,
                &amount_key(amount),
                direction.as_str(),
            ]);

            out.push(Transaction {
                date,
                amount,
                direction,
                merchant: narration.clone(),
                description: narration,
                source: SourceType::CreditCard,
                category: None,
                month_sheet: "Auto".to_string(),
                fingerprint,
                imported_at: imported_at.clone(),
            });
        }

        out
    }
}
