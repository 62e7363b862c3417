//! Direction inference from a statement's running balance column
//!
//! Savings statements never print Dr/Cr. What they do print, on every
//! row, is the closing balance after the entry. Direction falls out of
//! checking whether adding the amount to the prior balance reproduces
//! that closing balance.

use crate::types::Direction;

/// Tolerance for rounding in statement balances
const EPSILON: f64 = 0.01;

/// Running-balance accumulator, scoped to a single parse.
///
/// Seeded from the statement's declared opening balance (zero if it had
/// none) and re-anchored to each row's closing balance after every
/// decision, so a wrong early guess never compounds down the statement.
#[derive(Debug, Clone, Copy)]
pub struct BalanceReconciler {
    current: f64,
}

impl BalanceReconciler {
    pub fn new(opening: f64) -> Self {
        Self { current: opening }
    }

    /// Decide debit/credit for one entry, then trust its closing balance
    /// as the new baseline unconditionally.
    pub fn infer(&mut self, amount: f64, closing: f64) -> Direction {
        let direction = if (self.current + amount - closing).abs() < EPSILON {
            Direction::Credit
        } else {
            Direction::Debit
        };
        self.current = closing;
        direction
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_then_credit() {
        let mut rec = BalanceReconciler::new(10_000.00);

        // 10,000 - 1,000 = 9,000: money left the account
        assert_eq!(rec.infer(1_000.00, 9_000.00), Direction::Debit);
        assert_eq!(rec.current(), 9_000.00);

        // 9,000 + 500 = 9,500: money came in
        assert_eq!(rec.infer(500.00, 9_500.00), Direction::Credit);
        assert_eq!(rec.current(), 9_500.00);
    }

    #[test]
    fn test_reanchors_after_wrong_seed() {
        // Unknown opening balance seeded at zero: the first call may be
        // labeled wrong, but the baseline snaps to the statement's truth.
        let mut rec = BalanceReconciler::new(0.0);
        assert_eq!(rec.infer(1_000.00, 9_000.00), Direction::Debit);
        assert_eq!(rec.current(), 9_000.00);

        // From here on inference is back in sync.
        assert_eq!(rec.infer(500.00, 9_500.00), Direction::Credit);
        assert_eq!(rec.infer(200.00, 9_300.00), Direction::Debit);
    }

    #[test]
    fn test_tolerates_rounding() {
        let mut rec = BalanceReconciler::new(100.00);
        assert_eq!(rec.infer(0.10, 100.105), Direction::Credit);
    }
}
