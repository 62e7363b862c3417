//! Typed failures and non-fatal warnings from statement parsing

use std::fmt;

use thiserror::Error;

/// Fatal parsing failures that abort an import
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No registered profile recognizes the statement text.
    #[error("no matching parser profile found for this statement")]
    NoMatchingProfile,
}

/// Non-fatal conditions surfaced alongside the parsed transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A candidate block or line did not match the profile's expected
    /// shape and was dropped. Siblings are unaffected.
    MalformedCandidate {
        profile: &'static str,
        snippet: String,
    },
    /// The statement declared no opening balance, so the running balance
    /// was seeded at zero. Directions inferred before the first closing
    /// balance re-anchors the reconciler are low-confidence.
    MissingOpeningBalance,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MalformedCandidate { profile, snippet } => {
                write!(f, "{profile}: dropped malformed candidate: {snippet}")
            }
            ParseWarning::MissingOpeningBalance => {
                write!(
                    f,
                    "no opening balance found; early debit/credit inference is low-confidence"
                )
            }
        }
    }
}
