//! HDFC savings-account statement profile
//!
//! Rows carry no Dr/Cr tag, narrations wrap across physical lines, and
//! the only direction signal is the closing-balance column. Parsing is
//! segment -> extract -> reconcile:
//!   01/12/23 UPI-SWIGGY BANGALORE 0000334455 01/12/23 250.00 9,750.00

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::balance::BalanceReconciler;
use crate::error::ParseWarning;
use crate::fingerprint::{amount_key, fingerprint};
use crate::profile::Profile;
use crate::segment::segment_blocks;
use crate::types::{normalize_whitespace, parse_amount, SourceType, Transaction};

const PROFILE_NAME: &str = "HDFC Savings Account";

fn identity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)HDFC BANK.*SAVINGS A/C").expect("identity regex"))
}

fn opening_balance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Opening Balance[\s\S]*?\n([\d,]+\.\d{2})").expect("opening balance regex")
    })
}

/// Date, narration, reference number, value date, amount, closing
/// balance, optional narration tail. All but the tail are required.
fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<date>\d{2}/\d{2}/\d{2})\s+",
            r"(?P<narration>.*?)\s+",
            r"(?P<ref>\S+)\s+",
            r"(?P<value_date>\d{2}/\d{2}/\d{2})\s+",
            r"(?P<amount>[\d,]+\.\d{2})\s+",
            r"(?P<closing>[\d,]+\.\d{2})",
            r"(?P<tail>.*)$"
        ))
        .expect("block regex")
    })
}

pub struct HdfcSavingsProfile;

impl Profile for HdfcSavingsProfile {
    fn name(&self) -> &'static str {
        PROFILE_NAME
    }

    fn source_type(&self) -> SourceType {
        SourceType::DebitUpi
    }

    fn identify(&self, text: &str) -> bool {
        identity_re().is_match(text)
    }

    fn parse(&self, text: &str, warnings: &mut Vec<ParseWarning>) -> Vec<Transaction> {
        let opening = opening_balance_re()
            .captures(text)
            .and_then(|caps| parse_amount(&caps[1]));
        if opening.is_none() {
            let warning = ParseWarning::MissingOpeningBalance;
            tracing::warn!(%warning, "seeding running balance at zero");
            warnings.push(warning);
        }
        let mut reconciler = BalanceReconciler::new(opening.unwrap_or(0.0));

        let imported_at = Utc::now().to_rfc3339();
        let mut out = Vec::new();

        for block in segment_blocks(text) {
            let parsed = block_re().captures(&block).and_then(|caps| {
                let amount = parse_amount(&caps["amount"])?;
                let closing = parse_amount(&caps["closing"])?;
                let narration =
                    normalize_whitespace(&format!("{} {}", &caps["narration"], &caps["tail"]));
                Some((
                    caps["date"].to_string(),
                    narration,
                    caps["ref"].to_string(),
                    amount,
                    closing,
                ))
            });

            let Some((date, narration, reference, amount, closing)) = parsed else {
                let warning = ParseWarning::MalformedCandidate {
                    profile: PROFILE_NAME,
                    snippet: block,
                };
                tracing::warn!(%warning, "dropping candidate");
                warnings.push(warning);
                continue;
            };

            // Document order matters here: each decision re-anchors the
            // running balance for the next one.
            let direction = reconciler.infer(amount, closing);

            let fingerprint = fingerprint(&[
                &date,
                &reference,
                &amount_key(amount),
                direction.as_str(),
            ]);

            out.push(Transaction {
                date,
                amount,
                direction,
                merchant: narration.clone(),
                description: narration,
                source: SourceType::DebitUpi,
                category: None,
                month_sheet: "Auto".to_string(),
                fingerprint,
                imported_at: imported_at.clone(),
            });
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    const SAMPLE: &str = "\
HDFC BANK Ltd.
Statement of SAVINGS A/C No 12345678901

Opening Balance
10,000.00

01/12/23 UPI-GROCERY MART 0000111222 01/12/23 1,000.00 9,000.00
02/12/23 NEFT REFUND ACME 0000333444 02/12/23 500.00 9,500.00
UPI/P2M/CONTINUATION
STATEMENT SUMMARY
Closing Balance
9,500.00
";

    #[test]
    fn test_identity() {
        assert!(HdfcSavingsProfile.identify(SAMPLE));
        assert!(!HdfcSavingsProfile.identify("HDFC BANK CREDIT CARD"));
    }

    #[test]
    fn test_balance_reconciliation_directions() {
        let mut warnings = Vec::new();
        let txns = HdfcSavingsProfile.parse(SAMPLE, &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(txns.len(), 2);

        // 10,000 -> 9,000 with amount 1,000: debit
        assert_eq!(txns[0].direction, Direction::Debit);
        assert_eq!(txns[0].amount, 1_000.00);

        // 9,000 + 500 = 9,500: credit
        assert_eq!(txns[1].direction, Direction::Credit);
        assert_eq!(txns[1].amount, 500.00);
    }

    #[test]
    fn test_wrapped_narration_joins_block() {
        let txns = HdfcSavingsProfile.parse(SAMPLE, &mut Vec::new());
        assert_eq!(txns[1].merchant, "NEFT REFUND ACME UPI/P2M/CONTINUATION");
    }

    #[test]
    fn test_missing_opening_balance_warns() {
        let text = "\
HDFC BANK SAVINGS A/C
01/12/23 UPI-GROCERY MART 0000111222 01/12/23 1,000.00 9,000.00
";
        let mut warnings = Vec::new();
        let txns = HdfcSavingsProfile.parse(text, &mut warnings);
        assert_eq!(txns.len(), 1);
        assert_eq!(warnings, vec![ParseWarning::MissingOpeningBalance]);
        // Seeded at zero, 0 + 1000 != 9000, so this reads as a debit.
        assert_eq!(txns[0].direction, Direction::Debit);
    }

    #[test]
    fn test_malformed_block_is_dropped_not_fatal() {
        let text = "\
HDFC BANK SAVINGS A/C
Opening Balance
10,000.00

01/12/23 UPI-GROCERY MART 0000111222 01/12/23 1,000.00 9,000.00
03/12/23 TRUNCATED ROW WITH NO NUMBERS
04/12/23 UPI-CHAI POINT 0000555666 04/12/23 50.00 8,950.00
";
        let mut warnings = Vec::new();
        let txns = HdfcSavingsProfile.parse(text, &mut warnings);
        assert_eq!(txns.len(), 2);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            ParseWarning::MalformedCandidate { profile, snippet }
                if *profile == PROFILE_NAME && snippet.contains("TRUNCATED")
        ));
        // The good rows still reconcile in order.
        assert_eq!(txns[1].direction, Direction::Debit);
    }

    #[test]
    fn test_fingerprint_uses_reference_number() {
        let txns = HdfcSavingsProfile.parse(SAMPLE, &mut Vec::new());
        // Same date/amount but different refs must not collide.
        let text_same_amounts = "\
HDFC BANK SAVINGS A/C
Opening Balance
10,000.00

01/12/23 UPI-GROCERY MART 0000999888 01/12/23 1,000.00 9,000.00
";
        let other = HdfcSavingsProfile.parse(text_same_amounts, &mut Vec::new());
        assert_ne!(txns[0].fingerprint, other[0].fingerprint);
    }
}
