//! End-to-end parses of realistic statement texts through the public
//! entry point, covering determinism and idempotent re-import.

use std::collections::HashSet;

use khata_core::{parse_statement, Direction, ParseError, ParseWarning, SourceType};

const SAVINGS_STATEMENT: &str = "\
HDFC BANK Ltd.
Statement of SAVINGS A/C No 50100212345678
Branch: KORAMANGALA, BANGALORE

Opening Balance
10,000.00

Date Narration Chq/Ref No Value Dt Amount Balance
01/12/23 UPI-GROCERY MART-GROCERYMART@YBL 0000112233445566 01/12/23 1,000.00 9,000.00
Page No .: 1
-- 1 of 2 --
02/12/23 NEFT CR-ACME CORP SALARY 0000998877665544 02/12/23 500.00 9,500.00
DEC2023 REIMBURSEMENT
03/12/23 THIS ROW LOST ITS NUMBERS IN EXTRACTION
04/12/23 UPI-CHAI POINT-CHAIPOINT@OKICICI 0000123123123123 04/12/23 50.00 9,450.00
STATEMENT SUMMARY
Opening Balance Closing Balance Debits Credits
10,000.00 9,450.00 2 1
";

const CREDIT_STATEMENT: &str = "\
HDFC BANK
Your CREDIT CARD Statement

Date Transaction Description Amount
20/12/2023 AMAZON SELLER SERVICES 2,500.00 Dr
21/12/2023 IRCTC TICKETING 890.50 Dr
22/12/2023 PAYMENT RECEIVED - NETBANKING 10,000.00 Cr
";

#[test]
fn test_savings_statement_end_to_end() {
    let report = parse_statement(SAVINGS_STATEMENT).unwrap();
    assert_eq!(report.profile_name, "HDFC Savings Account");

    // 3 valid rows + 1 malformed one: 3 transactions, 1 warning.
    assert_eq!(report.transactions.len(), 3);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        ParseWarning::MalformedCandidate { snippet, .. } if snippet.contains("LOST ITS NUMBERS")
    ));

    let txns = &report.transactions;
    assert!(txns.iter().all(|t| t.source == SourceType::DebitUpi));

    assert_eq!(txns[0].direction, Direction::Debit);
    assert_eq!(txns[1].direction, Direction::Credit);
    assert_eq!(txns[2].direction, Direction::Debit);

    // Continuation line folded into the narration, pagination stripped.
    assert_eq!(
        txns[1].description,
        "NEFT CR-ACME CORP SALARY DEC2023 REIMBURSEMENT"
    );
    assert!(!txns[1].description.contains("Page No"));

    // Nothing leaks in from the summary section.
    assert_eq!(txns.last().unwrap().date, "04/12/23");
}

#[test]
fn test_credit_statement_end_to_end() {
    let report = parse_statement(CREDIT_STATEMENT).unwrap();
    assert_eq!(report.profile_name, "HDFC Credit Card");
    assert!(report.warnings.is_empty());

    let txns = &report.transactions;
    assert_eq!(txns.len(), 3);
    assert_eq!(txns[0].merchant, "AMAZON SELLER SERVICES");
    assert_eq!(txns[0].amount, 2500.00);
    assert_eq!(txns[0].direction, Direction::Debit);
    assert_eq!(txns[2].direction, Direction::Credit);
    assert!(txns.iter().all(|t| t.source == SourceType::CreditCard));
}

#[test]
fn test_parse_is_deterministic() {
    let a = parse_statement(SAVINGS_STATEMENT).unwrap();
    let b = parse_statement(SAVINGS_STATEMENT).unwrap();

    assert_eq!(a.transactions.len(), b.transactions.len());
    for (x, y) in a.transactions.iter().zip(&b.transactions) {
        // Identical everything except the processing timestamp.
        assert_eq!(x.date, y.date);
        assert_eq!(x.amount, y.amount);
        assert_eq!(x.direction, y.direction);
        assert_eq!(x.description, y.description);
        assert_eq!(x.fingerprint, y.fingerprint);
    }
    assert_eq!(a.warnings, b.warnings);
}

#[test]
fn test_reimport_produces_no_new_fingerprints() {
    let first: HashSet<String> = parse_statement(CREDIT_STATEMENT)
        .unwrap()
        .transactions
        .into_iter()
        .map(|t| t.fingerprint)
        .collect();
    let second: HashSet<String> = parse_statement(CREDIT_STATEMENT)
        .unwrap()
        .transactions
        .into_iter()
        .map(|t| t.fingerprint)
        .collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_foreign_statement_aborts() {
    let err = parse_statement("ICICI BANK STATEMENT\n01/01/24 SOMETHING 100.00\n").unwrap_err();
    assert_eq!(err, ParseError::NoMatchingProfile);
}
