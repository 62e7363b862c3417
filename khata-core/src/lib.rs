//! khata-core: statement parsing and normalization engine
//!
//! Text in, normalized transactions out. Profile selection, block
//! segmentation, field extraction, balance-based direction inference,
//! and fingerprint-based idempotency live here; PDF text extraction,
//! categorization, and storage are collaborators in sibling crates.

pub mod balance;
pub mod error;
pub mod fingerprint;
pub mod profile;
pub mod profiles;
pub mod segment;
pub mod types;

pub use error::{ParseError, ParseWarning};
pub use profile::{parse_statement, registry, select_profile, ParseReport, Profile};
pub use types::{Category, Direction, SourceType, Transaction};
