//! Substitution legality.

mod ledger;

pub use ledger::SubstitutionLedger;
