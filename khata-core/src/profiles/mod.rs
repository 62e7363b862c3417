//! Concrete statement profiles, one module per supported format

pub mod hdfc_credit;
pub mod hdfc_savings;

pub use hdfc_credit::HdfcCreditProfile;
pub use hdfc_savings::HdfcSavingsProfile;
