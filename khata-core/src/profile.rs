//! Profile registry, selection, and the parsing entry point

use std::sync::OnceLock;

use crate::error::{ParseError, ParseWarning};
use crate::profiles::{HdfcCreditProfile, HdfcSavingsProfile};
use crate::types::{SourceType, Transaction};

/// A bank/account-format-specific parsing strategy.
///
/// Profiles are stateless. `identify` is cheap pattern presence (bank
/// name plus account-type marker), not full-document validation;
/// `parse` turns statement text into normalized transactions, pushing
/// any non-fatal warnings it swallows along the way.
pub trait Profile: Send + Sync {
    fn name(&self) -> &'static str;
    fn source_type(&self) -> SourceType;
    fn identify(&self, text: &str) -> bool;
    fn parse(&self, text: &str, warnings: &mut Vec<ParseWarning>) -> Vec<Transaction>;
}

/// The fixed, ordered profile registry, built once per process.
///
/// Order is the deterministic tie-break if a text ever satisfied more
/// than one identity pattern.
pub fn registry() -> &'static [Box<dyn Profile>] {
    static REGISTRY: OnceLock<Vec<Box<dyn Profile>>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| vec![Box::new(HdfcCreditProfile), Box::new(HdfcSavingsProfile)])
        .as_slice()
}

/// First-match selection over the ordered registry.
pub fn select_profile<'a>(
    profiles: &'a [Box<dyn Profile>],
    text: &str,
) -> Result<&'a dyn Profile, ParseError> {
    profiles
        .iter()
        .find(|p| p.identify(text))
        .map(|p| p.as_ref())
        .ok_or(ParseError::NoMatchingProfile)
}

/// Everything one parse produced: transactions in document order plus
/// the non-fatal warnings collected while producing them.
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<ParseWarning>,
    pub profile_name: &'static str,
}

/// Parse extracted statement text with the first matching profile.
///
/// The only entry point of the engine. Pure function of the text and
/// the fixed registry; holds no state across calls, so callers may
/// parse many documents in parallel.
pub fn parse_statement(text: &str) -> Result<ParseReport, ParseError> {
    let profile = select_profile(registry(), text)?;
    tracing::info!(profile = profile.name(), "matched statement profile");

    let mut warnings = Vec::new();
    let transactions = profile.parse(text, &mut warnings);

    Ok(ParseReport {
        transactions,
        warnings,
        profile_name: profile.name(),
    })
}
